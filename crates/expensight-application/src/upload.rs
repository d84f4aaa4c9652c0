//! Upload coordinator.
//!
//! Submits a receipt file to the authority's OCR pipeline and appends the
//! derived expense record to the shared cache. Failures are reported once
//! to the caller; no retry is performed and the cache is untouched.

use expensight_core::api::{AuthorityClient, UploadOutcome};
use expensight_core::collection::ExpenseCollection;
use expensight_core::error::UploadError;
use std::sync::{Arc, RwLock};

/// File extensions the authority accepts for receipt uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

/// Coordinates receipt upload and cache append.
pub struct UploadCoordinator {
    api: Arc<dyn AuthorityClient>,
    collection: Arc<RwLock<ExpenseCollection>>,
}

impl UploadCoordinator {
    pub fn new(
        api: Arc<dyn AuthorityClient>,
        collection: Arc<RwLock<ExpenseCollection>>,
    ) -> Self {
        Self { api, collection }
    }

    /// Uploads a receipt and appends the derived expense to the cache.
    ///
    /// Unsupported file types are rejected before any network traffic,
    /// mirroring the authority's whitelist. A duplicate id on append is a
    /// client bug: it is logged and the cache keeps its existing record,
    /// but the upload itself still succeeded at the authority.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadOutcome, UploadError> {
        validate_file_name(file_name)?;

        let outcome = self
            .api
            .upload_receipt(bytes, file_name)
            .await
            .map_err(UploadError::from)?;

        if let Err(e) = self
            .collection
            .write()
            .unwrap()
            .append(outcome.expense.clone())
        {
            tracing::error!("[Upload] Refusing duplicate append: {}", e);
        } else {
            tracing::debug!(
                "[Upload] Receipt {} became expense {}",
                file_name,
                outcome.expense.id
            );
        }
        Ok(outcome)
    }
}

/// Checks the file name against the accepted extension whitelist.
fn validate_file_name(file_name: &str) -> Result<(), UploadError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(UploadError::Validation(format!(
            "unsupported file type: {file_name} (allowed: png, jpg, jpeg, pdf)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAuthority, pending_expense};
    use expensight_core::error::ApiError;
    use expensight_core::expense::ReceiptRef;
    use std::sync::atomic::Ordering;

    fn outcome(id: i64) -> UploadOutcome {
        UploadOutcome {
            expense: pending_expense(id, 12.30),
            receipt: ReceiptRef {
                id: Some(1),
                filename: "receipt.png".to_string(),
                uploaded_at: None,
            },
        }
    }

    fn coordinator(api: &Arc<MockAuthority>) -> (UploadCoordinator, Arc<RwLock<ExpenseCollection>>) {
        let collection = Arc::new(RwLock::new(ExpenseCollection::new()));
        (
            UploadCoordinator::new(api.clone(), Arc::clone(&collection)),
            collection,
        )
    }

    #[tokio::test]
    async fn successful_upload_appends_the_derived_expense() {
        let api = Arc::new(MockAuthority::new());
        api.set_upload(Ok(outcome(11)));
        let (coordinator, collection) = coordinator(&api);

        let outcome = coordinator
            .upload(vec![0xFF, 0xD8], "receipt.jpg")
            .await
            .unwrap();
        assert_eq!(outcome.expense.id, 11);
        assert!(collection.read().unwrap().get(11).is_some());
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected_before_any_network_call() {
        let api = Arc::new(MockAuthority::new());
        let (coordinator, collection) = coordinator(&api);

        let err = coordinator
            .upload(vec![1, 2, 3], "notes.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Validation(_)));
        assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
        assert!(collection.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn extension_check_is_case_insensitive() {
        let api = Arc::new(MockAuthority::new());
        api.set_upload(Ok(outcome(3)));
        let (coordinator, _) = coordinator(&api);

        coordinator.upload(vec![1], "SCAN.PDF").await.unwrap();
        assert_eq!(api.upload_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn processing_failure_leaves_the_cache_unchanged() {
        let api = Arc::new(MockAuthority::new());
        api.set_upload(Err(ApiError::status(
            400,
            "Could not read the amount from the receipt",
        )));
        let (coordinator, collection) = coordinator(&api);

        let err = coordinator
            .upload(vec![1], "receipt.png")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::ProcessingFailed(_)));
        assert!(collection.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_append_is_reported_but_the_upload_succeeds() {
        let api = Arc::new(MockAuthority::new());
        api.set_upload(Ok(outcome(11)));
        let (coordinator, collection) = coordinator(&api);
        collection
            .write()
            .unwrap()
            .append(pending_expense(11, 99.0))
            .unwrap();

        coordinator.upload(vec![1], "receipt.png").await.unwrap();
        // The original cached record wins; no silent merge.
        let cache = collection.read().unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(11).unwrap().amount, 99.0);
    }
}
