use crate::entity::{Car, CarId, PageSize, PageWindow, SearchTerm, SortKey, UserEmail};
use crate::KernelError;

/// Filter half of the resolver contract: an optional ownership scope combined
/// by AND with an optional free-text search over name, category and location.
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    owner: Option<UserEmail>,
    search: Option<SearchTerm>,
}

impl CarFilter {
    pub fn new(owner: Option<UserEmail>, search: Option<SearchTerm>) -> Self {
        Self { owner, search }
    }

    pub fn owned_by(owner: UserEmail) -> Self {
        Self {
            owner: Some(owner),
            search: None,
        }
    }

    pub fn owner(&self) -> Option<&UserEmail> {
        self.owner.as_ref()
    }

    pub fn search(&self) -> Option<&SearchTerm> {
        self.search.as_ref()
    }
}

#[async_trait::async_trait]
pub trait CarQuery<Connection: Send>: 'static + Sync + Send {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError>;

    /// Total matching the filter, ignoring pagination. Not transactional with
    /// respect to a following `find_page`.
    async fn count(
        &self,
        con: &mut Connection,
        filter: &CarFilter,
    ) -> error_stack::Result<i64, KernelError>;

    async fn find_page(
        &self,
        con: &mut Connection,
        filter: &CarFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Car>, KernelError>;

    async fn find_recent(
        &self,
        con: &mut Connection,
        limit: PageSize,
    ) -> error_stack::Result<Vec<Car>, KernelError>;
}

pub trait DependOnCarQuery<Connection: Send>: 'static + Sync + Send {
    type CarQuery: CarQuery<Connection>;
    fn car_query(&self) -> &Self::CarQuery;
}
