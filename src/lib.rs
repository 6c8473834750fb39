pub mod generate;
pub mod output;
pub mod record;
pub mod store;

pub use record::{RECORD_SIZE, SensorRecord};
