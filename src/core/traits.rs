//! One small trait per resource capability.
//!
//! Resource APIs implement only the subset they support, which keeps code
//! that is generic over "anything listable" easy to write and to fake.

use async_trait::async_trait;

use super::error::Error;

#[async_trait]
pub trait List {
    type Item;

    async fn list(&self) -> Result<Vec<Self::Item>, Error>;
}

#[async_trait]
pub trait Retrieve {
    type Item;

    async fn retrieve(&self, id: &str) -> Result<Self::Item, Error>;
}

#[async_trait]
pub trait Create {
    type Params: Sync;
    type Output;

    async fn create(&self, params: &Self::Params) -> Result<Self::Output, Error>;
}

#[async_trait]
pub trait Delete {
    type Output;

    async fn delete(&self, id: &str) -> Result<Self::Output, Error>;
}
