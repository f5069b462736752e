pub mod terminal;

pub use terminal::Terminal;
