pub mod degrees;
pub mod diagram;
pub mod rewire;
pub mod version;
