pub mod supervisor;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;
