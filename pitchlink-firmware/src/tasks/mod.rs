//! Embassy tasks

mod radio_irq;
mod unit;

pub use radio_irq::radio_irq_task;
pub use unit::unit_task;
