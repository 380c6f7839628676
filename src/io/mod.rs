//! 入出力モジュール

pub mod csv;

pub use self::csv::{read_csv, write_csv};
