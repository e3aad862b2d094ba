mod common;

mod test_config;
