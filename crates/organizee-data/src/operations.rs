use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Insert<T> {
    async fn insert(&self, item: T) -> Result<T>;
}

#[async_trait]
pub trait Update<T> {
    async fn update(&self, item: T) -> Result<T>;
}

/// Insert or, if the item's conflict key is already present,
/// overwrite the existing row in place.
#[async_trait]
pub trait Upsert<T> {
    async fn upsert(&self, item: T) -> Result<T>;
}

#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}


#[async_trait]
pub trait Delete<T> {
    async fn delete(&self, item: T) -> Result<()>;
}

/// Total of the amount column for T, optionally scoped
/// to a single calendar year. Missing rows sum to zero.
#[async_trait]
pub trait SumAmount<T> {
    async fn sum_amount(&self, year: Option<i32>) -> Result<i64>;
}
