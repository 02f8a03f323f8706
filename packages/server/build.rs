fn main() {
    // The admin UI is embedded with rust-embed and the Postgres schema with
    // sqlx::migrate!; rebuild when either changes.
    println!("cargo:rerun-if-changed=../admin-ui");
    println!("cargo:rerun-if-changed=migrations");
}
