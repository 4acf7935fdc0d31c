use crate::db::client::DbClient;

pub fn setup_test_db() -> DbClient {
    setup_test_db_with(true)
}

pub fn setup_test_db_with(run_migrations: bool) -> DbClient {
    std::fs::create_dir(".tmp").err();
    std::fs::remove_file(".tmp/test.db").err();
    if run_migrations {
        DbClient::new("file:.tmp/test.db").unwrap()
    } else {
        DbClient::connect("file:.tmp/test.db").unwrap()
    }
}
