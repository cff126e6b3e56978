//! Initial database migration.
//!
//! Creates the enum types, the inventory, requisition, loan, audit and
//! laboratory tables, and the `updated_at` trigger on consumables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CATALOG
        // ============================================================
        db.execute_unprepared(CONSUMABLES_SQL).await?;

        // ============================================================
        // PART 3: REQUISITIONS
        // ============================================================
        db.execute_unprepared(ORDERS_SQL).await?;
        db.execute_unprepared(ORDER_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: LOANS
        // ============================================================
        db.execute_unprepared(BORROWS_SQL).await?;
        db.execute_unprepared(RETURNS_SQL).await?;

        // ============================================================
        // PART 5: AUDIT
        // ============================================================
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;

        // ============================================================
        // PART 6: LABORATORIES
        // ============================================================
        db.execute_unprepared(LABORATORIES_SQL).await?;
        db.execute_unprepared(LAB_ASSETS_SQL).await?;

        // ============================================================
        // PART 7: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE order_status AS ENUM ('pending', 'approved', 'rejected');

CREATE TYPE borrower_type AS ENUM ('student', 'staff');

CREATE TYPE lab_status AS ENUM ('active', 'inactive', 'maintenance');

CREATE TYPE asset_status AS ENUM ('available', 'in_use', 'maintenance', 'retired');
";

const CONSUMABLES_SQL: &str = r"
CREATE TABLE consumables (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name            VARCHAR(255) NOT NULL,
    description     TEXT,
    category        VARCHAR(100) NOT NULL,
    quantity        INTEGER NOT NULL DEFAULT 0,
    damaged         INTEGER NOT NULL DEFAULT 0,
    returnable      BOOLEAN NOT NULL DEFAULT FALSE,
    image_url       VARCHAR(500),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_consumable_quantity CHECK (quantity >= 0),
    CONSTRAINT chk_consumable_damaged CHECK (damaged >= 0)
);

CREATE INDEX idx_consumables_category ON consumables(category, name);
";

const ORDERS_SQL: &str = r"
CREATE TABLE orders (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    requester       VARCHAR(255) NOT NULL,
    department      VARCHAR(255) NOT NULL,
    purpose         TEXT NOT NULL,
    date_needed     DATE NOT NULL,
    status          order_status NOT NULL DEFAULT 'pending',
    decided_by      VARCHAR(255),
    decided_at      TIMESTAMPTZ,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_order_decision CHECK (
        (status = 'pending' AND decided_at IS NULL)
        OR (status <> 'pending' AND decided_at IS NOT NULL)
    )
);

CREATE INDEX idx_orders_status ON orders(status, created_at DESC);
";

const ORDER_ITEMS_SQL: &str = r"
CREATE TABLE order_items (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    order_id        UUID NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    consumable_id   UUID NOT NULL REFERENCES consumables(id) ON DELETE CASCADE,
    quantity        INTEGER NOT NULL,

    CONSTRAINT chk_order_item_quantity CHECK (quantity > 0)
);

CREATE INDEX idx_order_items_order ON order_items(order_id);
CREATE INDEX idx_order_items_consumable ON order_items(consumable_id);
";

const BORROWS_SQL: &str = r"
CREATE TABLE borrows (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    consumable_id   UUID NOT NULL REFERENCES consumables(id) ON DELETE CASCADE,
    borrower_name   VARCHAR(255) NOT NULL,
    borrower_type   borrower_type NOT NULL,
    quantity        INTEGER NOT NULL,
    recorded_by     VARCHAR(255) NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_borrow_quantity CHECK (quantity > 0)
);

CREATE INDEX idx_borrows_consumable ON borrows(consumable_id);
";

const RETURNS_SQL: &str = r"
CREATE TABLE returns (
    id                  UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    borrow_id           UUID NOT NULL UNIQUE REFERENCES borrows(id) ON DELETE CASCADE,
    returned_quantity   INTEGER NOT NULL,
    damaged_quantity    INTEGER NOT NULL,
    recorded_by         VARCHAR(255) NOT NULL,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_return_returned CHECK (returned_quantity >= 0),
    CONSTRAINT chk_return_damaged CHECK (damaged_quantity >= 0)
);
";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE audit_logs (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    actor           VARCHAR(255) NOT NULL,
    action          VARCHAR(100) NOT NULL,
    details         TEXT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_audit_logs_created ON audit_logs(created_at DESC);
";

const LABORATORIES_SQL: &str = r"
CREATE TABLE laboratories (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name            VARCHAR(255) NOT NULL,
    status          lab_status NOT NULL DEFAULT 'active',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const LAB_ASSETS_SQL: &str = r"
CREATE TABLE lab_assets (
    id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    lab_id          UUID NOT NULL REFERENCES laboratories(id),
    name            VARCHAR(255) NOT NULL,
    category        VARCHAR(100) NOT NULL,
    status          asset_status NOT NULL DEFAULT 'available',
    purchase_date   DATE,
    description     TEXT,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_lab_assets_lab ON lab_assets(lab_id, status);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_consumables_updated_at
    BEFORE UPDATE ON consumables
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS lab_assets;
DROP TABLE IF EXISTS laboratories;
DROP TABLE IF EXISTS audit_logs;
DROP TABLE IF EXISTS returns;
DROP TABLE IF EXISTS borrows;
DROP TABLE IF EXISTS order_items;
DROP TABLE IF EXISTS orders;
DROP TABLE IF EXISTS consumables;
DROP FUNCTION IF EXISTS touch_updated_at();
DROP TYPE IF EXISTS asset_status;
DROP TYPE IF EXISTS lab_status;
DROP TYPE IF EXISTS borrower_type;
DROP TYPE IF EXISTS order_status;
";
