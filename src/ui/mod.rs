pub mod controller;
pub mod html;
pub mod page;
pub mod port;
pub mod shell;
#[cfg(test)]
pub mod testing;
