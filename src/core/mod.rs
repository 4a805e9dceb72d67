pub mod catalog;
pub mod dispatcher;
pub mod query;
pub mod report;
pub mod session;

pub use crate::domain::model::{Category, Customer, Dataset, Employee, Order, Product};
pub use crate::domain::ports::{ConfigProvider, Entity, RecordStore};
pub use crate::utils::error::Result;
