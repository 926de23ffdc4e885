pub mod db;

#[cfg(test)]
pub mod test_support;
