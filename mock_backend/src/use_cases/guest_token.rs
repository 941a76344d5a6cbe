use uuid::Uuid;

use crate::domain::entities::{Principal, Table};
use crate::domain::errors::BackendError;
use crate::domain::ports::TokenStore;

// Token and identifiers handed to a guest after resolving a table link.
#[derive(Debug)]
pub struct GuestTokenResponse {
    pub token: String,
    pub employee_id: String,
    pub guest_id: String,
}

// Guest token use case: resolves a table code to the serving employee.
pub struct GuestTokenUseCase<'a, S> {
    pub tables: &'a [Table],
    pub store: S,
}

impl<S> GuestTokenUseCase<'_, S>
where
    S: TokenStore,
{
    pub async fn execute(&self, table: &str) -> Result<GuestTokenResponse, BackendError> {
        if table.trim().is_empty() {
            return Err(BackendError::Validation(vec![(
                "table".to_string(),
                "The table field is required.".to_string(),
            )]));
        }

        let table = self
            .tables
            .iter()
            .find(|candidate| candidate.code == table.trim())
            .ok_or(BackendError::UnknownTable)?;

        let token = Uuid::new_v4().to_string();
        // Short guest ids keep query strings readable in logs.
        let guest_id = Uuid::new_v4().simple().to_string()[..12].to_string();

        self.store
            .insert(
                token.clone(),
                Principal::Guest {
                    table: table.code.clone(),
                    employee_id: table.employee_id.clone(),
                    guest_id: guest_id.clone(),
                },
            )
            .await
            .map_err(|_| BackendError::StorageFailure)?;

        Ok(GuestTokenResponse {
            token,
            employee_id: table.employee_id.clone(),
            guest_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::RecordingStore;

    fn tables() -> Vec<Table> {
        vec![Table {
            code: "T1".to_string(),
            employee_id: "7".to_string(),
        }]
    }

    #[tokio::test]
    async fn when_table_is_known_then_guest_principal_is_stored() {
        let tables = tables();
        let store = RecordingStore::new();
        let use_case = GuestTokenUseCase {
            tables: &tables,
            store: store.clone(),
        };

        let result = use_case.execute("T1").await.expect("expected guest token");

        assert_eq!(result.employee_id, "7");
        assert_eq!(result.guest_id.len(), 12);
        match store.get_test_principal(&result.token) {
            Some(Principal::Guest {
                table, employee_id, ..
            }) => {
                assert_eq!(table, "T1");
                assert_eq!(employee_id, "7");
            }
            other => panic!("unexpected principal: {other:?}"),
        }
    }

    #[tokio::test]
    async fn when_table_is_unknown_then_returns_unknown_table() {
        let tables = tables();
        let use_case = GuestTokenUseCase {
            tables: &tables,
            store: RecordingStore::new(),
        };

        let result = use_case.execute("T9").await;

        assert!(matches!(result, Err(BackendError::UnknownTable)));
    }

    #[tokio::test]
    async fn when_table_is_blank_then_returns_validation() {
        let tables = tables();
        let use_case = GuestTokenUseCase {
            tables: &tables,
            store: RecordingStore::new(),
        };

        let result = use_case.execute("   ").await;

        assert!(matches!(result, Err(BackendError::Validation(_))));
    }
}
