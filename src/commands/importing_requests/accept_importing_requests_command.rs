use super::{ensure_transition, find_request, transition};
use crate::{
    commands::Command,
    entities::importing_request::{self, ImportingRequestStatus},
    errors::ServiceError,
};
use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use uuid::Uuid;

/// Bulk accept: either every listed request moves to `accepted`, or none does.
#[derive(Debug, Clone)]
pub struct AcceptImportingRequestsCommand {
    pub importing_request_ids: Vec<Uuid>,
    pub handler_id: Uuid,
}

impl AcceptImportingRequestsCommand {
    pub fn new(ids: Vec<Uuid>, handler_id: Uuid) -> Self {
        let mut importing_request_ids = Vec::with_capacity(ids.len());
        for id in ids {
            if !importing_request_ids.contains(&id) {
                importing_request_ids.push(id);
            }
        }
        Self {
            importing_request_ids,
            handler_id,
        }
    }
}

#[async_trait]
impl Command for AcceptImportingRequestsCommand {
    type Refs = Vec<importing_request::Model>;
    type Output = Vec<importing_request::Model>;

    const NAME: &'static str = "accept_importing_requests";

    async fn resolve(&self, txn: &DatabaseTransaction) -> Result<Self::Refs, ServiceError> {
        let mut requests = Vec::with_capacity(self.importing_request_ids.len());
        for id in &self.importing_request_ids {
            requests.push(find_request(txn, *id).await?);
        }
        Ok(requests)
    }

    async fn check(
        &self,
        _txn: &DatabaseTransaction,
        requests: &Self::Refs,
    ) -> Result<(), ServiceError> {
        requests
            .iter()
            .try_for_each(|r| ensure_transition(r, ImportingRequestStatus::Accepted))
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        requests: Self::Refs,
    ) -> Result<Self::Output, ServiceError> {
        let mut accepted = Vec::with_capacity(requests.len());
        for request in requests {
            accepted.push(
                transition(txn, request, ImportingRequestStatus::Accepted, self.handler_id).await?,
            );
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_ids_are_collapsed_in_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cmd = AcceptImportingRequestsCommand::new(vec![a, b, a], Uuid::new_v4());
        assert_eq!(cmd.importing_request_ids, vec![a, b]);
    }
}
