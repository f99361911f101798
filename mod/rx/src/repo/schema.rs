use pharmacy_core::ServiceError;
use pharmacy_sql::SQLStore;

/// Initialize the SQLite schema for all pharmacy resources.
///
/// Uniqueness and referential integrity live here; the repositories map
/// constraint failures to `Conflict`/`NotFound`.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS suppliers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS drugs (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            stock INTEGER NOT NULL,
            supplier_id TEXT,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (supplier_id) REFERENCES suppliers(id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_drugs_name ON drugs(name)",
        "CREATE INDEX IF NOT EXISTS idx_drugs_supplier ON drugs(supplier_id)",

        "CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY,
            drug_id TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            placed_by TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (drug_id) REFERENCES drugs(id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_orders_drug ON orders(drug_id)",
        "CREATE INDEX IF NOT EXISTS idx_orders_placed_by ON orders(placed_by)",

        "CREATE TABLE IF NOT EXISTS sales_reports (
            id TEXT PRIMARY KEY,
            period_start TEXT NOT NULL,
            period_end TEXT NOT NULL,
            generated_by TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",

        "CREATE TABLE IF NOT EXISTS admin_users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS doctor_users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ];

    for stmt in statements {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
    }
    Ok(())
}
