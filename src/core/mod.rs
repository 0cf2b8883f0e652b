pub mod aggregate;
pub mod bootstrap;
pub mod mapper;
pub mod service;
pub mod store;

pub use crate::domain::model::{CreatedOrder, Criteria, NewOrder, Record, Statistics};
pub use crate::domain::ports::{ConfigProvider, SheetHost, StoreBackend};
pub use crate::domain::row::{CellValue, Row};
pub use crate::utils::error::Result;
