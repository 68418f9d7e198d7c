pub mod mapper000;
pub mod mapper001;
pub mod mmc1;
