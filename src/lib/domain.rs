//! Campaign domain: recipients, rendering pipeline and message hand-off

pub mod campaigns;
pub mod communication;
pub mod rendering;
pub mod storage;
