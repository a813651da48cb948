#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops
)]

#[macro_use]
pub mod logging;

pub mod config;
pub mod discipline;
pub mod event;
pub mod packet;
pub mod quantities;
pub mod rand;
pub mod report;
pub mod sim;
pub mod source;
pub mod stats;
