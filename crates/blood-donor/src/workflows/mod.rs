pub mod donors;
