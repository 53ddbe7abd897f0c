use super::StoreError;
use crate::customer::ServiceRequest;
use crate::request::PrincipalId;

/// Read access to service requests for the homepage.
pub trait ServiceRequestStore {
    /// Requests raised for customers owned by `owner`, newest first.
    fn find_for_owner(&self, owner: PrincipalId) -> Result<Vec<ServiceRequest>, StoreError>;

    /// Every request, newest first.
    fn find_all_ordered(&self) -> Result<Vec<ServiceRequest>, StoreError>;
}

/// In-memory [`ServiceRequestStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryServiceRequestStore {
    requests: Vec<ServiceRequest>,
}

impl InMemoryServiceRequestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request.
    pub fn insert(&mut self, request: ServiceRequest) {
        self.requests.push(request);
    }

    fn newest_first<'a>(&self, iter: impl Iterator<Item = &'a ServiceRequest>) -> Vec<ServiceRequest> {
        let mut out: Vec<_> = iter.cloned().collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }
}

impl ServiceRequestStore for InMemoryServiceRequestStore {
    fn find_for_owner(&self, owner: PrincipalId) -> Result<Vec<ServiceRequest>, StoreError> {
        Ok(self.newest_first(self.requests.iter().filter(|r| r.owner == owner)))
    }

    fn find_all_ordered(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        Ok(self.newest_first(self.requests.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerId;

    fn request(id: u64, owner: u64) -> ServiceRequest {
        ServiceRequest {
            id,
            title: format!("Request {id}"),
            customer: CustomerId(owner * 10),
            customer_name: format!("Customer of {owner}"),
            owner: PrincipalId(owner),
        }
    }

    #[test]
    fn owner_sees_only_own_requests_newest_first() {
        let mut store = InMemoryServiceRequestStore::new();
        store.insert(request(1, 1));
        store.insert(request(3, 2));
        store.insert(request(2, 1));

        let ids: Vec<_> = store
            .find_for_owner(PrincipalId(1))
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn all_ordered_is_newest_first() {
        let mut store = InMemoryServiceRequestStore::new();
        store.insert(request(1, 1));
        store.insert(request(3, 2));
        store.insert(request(2, 1));

        let ids: Vec<_> = store
            .find_all_ordered()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
