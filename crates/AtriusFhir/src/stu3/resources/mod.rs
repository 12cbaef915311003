pub mod observation;
pub use observation::*;

pub mod patient;
pub use patient::*;

pub mod payment_notice;
pub use payment_notice::*;
