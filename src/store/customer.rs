use std::collections::{BTreeMap, HashMap};

use super::StoreError;
use crate::customer::{Customer, CustomerId, Owned};
use crate::request::PrincipalId;

/// Unit-of-work access to customer records.
///
/// `register`, `merge` and `remove` only stage changes. Nothing is visible to
/// readers until [`commit`](CustomerStore::commit) returns `Ok`.
pub trait CustomerStore {
    /// Loads a customer by id.
    fn find(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Lists the customers owned by `owner`, newest (highest id) first.
    fn find_by_owner(&self, owner: PrincipalId) -> Result<Vec<Customer>, StoreError>;

    /// Stages a new customer for insertion.
    fn register(&mut self, customer: Customer) -> Result<(), StoreError>;

    /// Stages an update of an existing customer.
    fn merge(&mut self, customer: &Customer) -> Result<(), StoreError>;

    /// Stages the removal of an existing customer.
    fn remove(&mut self, customer: &Customer) -> Result<(), StoreError>;

    /// Applies every staged change, or none of them.
    ///
    /// Returns the ids assigned to registered customers, in staging order.
    fn commit(&mut self) -> Result<Vec<CustomerId>, StoreError>;
}

#[derive(Debug, Clone)]
enum Staged {
    Insert(Customer),
    Update(Customer),
    Remove { id: CustomerId, version: u64 },
}

/// In-memory [`CustomerStore`] with optimistic locking.
///
/// Each staged update or removal remembers the version it was loaded with.
/// `commit` checks those versions against the stored rows first and rejects
/// the whole batch with [`StoreError::Conflict`] on any mismatch. Staged
/// changes are discarded after every commit attempt.
///
/// # Examples
///
/// ```
/// use customer_guard::store::{CustomerStore, InMemoryCustomerStore};
/// use customer_guard::{Customer, PrincipalId};
///
/// let mut store = InMemoryCustomerStore::new();
/// let mut customer = Customer::new(PrincipalId(1));
/// customer.set_name("Acme Ltd");
///
/// store.register(customer).unwrap();
/// let ids = store.commit().unwrap();
///
/// let saved = store.find(ids[0]).unwrap().expect("committed");
/// assert_eq!(saved.version(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    rows: BTreeMap<CustomerId, Customer>,
    staged: Vec<Staged>,
    next_id: u64,
}

impl InMemoryCustomerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a committed customer directly, bypassing staging.
    pub fn seed(&mut self, name: impl Into<String>, owner: PrincipalId) -> CustomerId {
        let id = self.allocate_id();
        self.rows
            .insert(id, Customer::hydrate(id, name, Some(owner), 1));
        id
    }

    /// Returns the number of committed customers.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no customer is committed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of staged, uncommitted changes.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    fn allocate_id(&mut self) -> CustomerId {
        self.next_id += 1;
        CustomerId(self.next_id)
    }

    fn check_versions(&self) -> Result<(), StoreError> {
        // Versions as they would be after the ops seen so far; None once removed.
        let mut projected: HashMap<CustomerId, Option<u64>> = HashMap::new();

        for op in &self.staged {
            let (id, version) = match op {
                Staged::Insert(_) => continue,
                Staged::Update(customer) => match customer.id() {
                    Some(id) => (id, customer.version()),
                    None => return Err(StoreError::Invalid("update of unsaved customer".into())),
                },
                Staged::Remove { id, version } => (*id, *version),
            };

            let current = match projected.get(&id) {
                Some(state) => *state,
                None => self.rows.get(&id).map(Customer::version),
            };
            let found = current.ok_or(StoreError::NotFound(id))?;
            if found != version {
                return Err(StoreError::Conflict {
                    customer: id,
                    expected: version,
                    found,
                });
            }

            let next = match op {
                Staged::Remove { .. } => None,
                _ => Some(found + 1),
            };
            projected.insert(id, next);
        }
        Ok(())
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn find(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        Ok(self.rows.get(&id).cloned())
    }

    fn find_by_owner(&self, owner: PrincipalId) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .rows
            .values()
            .rev()
            .filter(|c| c.is_owned_by(owner))
            .cloned()
            .collect())
    }

    fn register(&mut self, customer: Customer) -> Result<(), StoreError> {
        if !customer.is_new() {
            return Err(StoreError::Invalid(format!(
                "customer {} is already persisted",
                customer.id().map_or(0, |id| id.0)
            )));
        }
        self.staged.push(Staged::Insert(customer));
        Ok(())
    }

    fn merge(&mut self, customer: &Customer) -> Result<(), StoreError> {
        if customer.is_new() {
            return Err(StoreError::Invalid("cannot merge an unsaved customer".into()));
        }
        self.staged.push(Staged::Update(customer.clone()));
        Ok(())
    }

    fn remove(&mut self, customer: &Customer) -> Result<(), StoreError> {
        let id = customer
            .id()
            .ok_or_else(|| StoreError::Invalid("cannot remove an unsaved customer".into()))?;
        self.staged.push(Staged::Remove {
            id,
            version: customer.version(),
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<Vec<CustomerId>, StoreError> {
        let checked = self.check_versions();
        let staged = std::mem::take(&mut self.staged);
        checked?;

        let mut inserted = Vec::new();
        for op in staged {
            match op {
                Staged::Insert(customer) => {
                    let id = self.allocate_id();
                    let row = Customer::hydrate(id, customer.name(), customer.owner(), 1);
                    self.rows.insert(id, row);
                    inserted.push(id);
                }
                Staged::Update(customer) => {
                    if let Some(id) = customer.id() {
                        let version = self
                            .rows
                            .get(&id)
                            .map_or(customer.version(), Customer::version);
                        let row =
                            Customer::hydrate(id, customer.name(), customer.owner(), version + 1);
                        self.rows.insert(id, row);
                    }
                }
                Staged::Remove { id, .. } => {
                    self.rows.remove(&id);
                }
            }
        }

        tracing::debug!(inserted = inserted.len(), total = self.rows.len(), "customer store committed");
        Ok(inserted)
    }
}
