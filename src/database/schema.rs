use sqlx::PgPool;
use tracing::info;

use super::DatabaseError;

/// Table DDL, ordered so foreign-key targets exist before their referents.
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            full_name VARCHAR(100) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            password_hash VARCHAR(100) NOT NULL,
            phone VARCHAR(20),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);"#,
    ),
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            role VARCHAR(50) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            password_hash VARCHAR(100) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_employees_email ON employees(email);
        CREATE INDEX IF NOT EXISTS idx_employees_role ON employees(role);"#,
    ),
    (
        "admins",
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            password_hash VARCHAR(100) NOT NULL,
            is_admin BOOLEAN NOT NULL DEFAULT false,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_admins_email ON admins(email);"#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            price DECIMAL(10,2) NOT NULL,
            on_offer BOOLEAN NOT NULL DEFAULT false,
            details TEXT,
            image_url VARCHAR(255)
        );
        CREATE INDEX IF NOT EXISTS idx_products_on_offer ON products(on_offer);
        CREATE INDEX IF NOT EXISTS idx_products_name ON products(name);"#,
    ),
    (
        "news",
        r#"
        CREATE TABLE IF NOT EXISTS news (
            id SERIAL PRIMARY KEY,
            title VARCHAR(150) NOT NULL,
            subtitle VARCHAR(300) NOT NULL,
            body TEXT NOT NULL,
            author VARCHAR(100) NOT NULL,
            published_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_news_published_at ON news(published_at);"#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            price DECIMAL(10,2) NOT NULL,
            on_offer BOOLEAN NOT NULL DEFAULT false,
            details TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_services_on_offer ON services(on_offer);
        CREATE INDEX IF NOT EXISTS idx_services_name ON services(name);"#,
    ),
    (
        "support_tickets",
        r#"
        CREATE TABLE IF NOT EXISTS support_tickets (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) NOT NULL,
            message TEXT NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'open',
            interaction_type VARCHAR(50) NOT NULL DEFAULT 'support',
            customer_email VARCHAR(100),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_support_tickets_status ON support_tickets(status);
        CREATE INDEX IF NOT EXISTS idx_support_tickets_email ON support_tickets(email);
        CREATE INDEX IF NOT EXISTS idx_support_tickets_customer_email ON support_tickets(customer_email);
        CREATE INDEX IF NOT EXISTS idx_support_tickets_interaction_type ON support_tickets(interaction_type);"#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id SERIAL PRIMARY KEY,
            customer_email VARCHAR(100) NOT NULL,
            status VARCHAR(50) NOT NULL,
            delivery_address TEXT NOT NULL,
            shipping_type VARCHAR(50) NOT NULL,
            shipping_cost DECIMAL(10,2) NOT NULL,
            total DECIMAL(10,2) NOT NULL,
            payment_method VARCHAR(50) NOT NULL,
            delivery_estimate VARCHAR(100),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_orders_customer_email ON orders(customer_email);
        CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status);"#,
    ),
    (
        "order_items",
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id SERIAL PRIMARY KEY,
            order_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            product_name VARCHAR(100) NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price DECIMAL(10,2) NOT NULL,
            FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE,
            FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE RESTRICT
        );
        CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id);"#,
    ),
    (
        "quote_requests",
        r#"
        CREATE TABLE IF NOT EXISTS quote_requests (
            id SERIAL PRIMARY KEY,
            client_name VARCHAR(100) NOT NULL,
            client_email VARCHAR(100) NOT NULL,
            phone VARCHAR(20) NOT NULL,
            description TEXT NOT NULL,
            service_name VARCHAR(100),
            status VARCHAR(50) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        CREATE INDEX IF NOT EXISTS idx_quote_requests_client_email ON quote_requests(client_email);
        CREATE INDEX IF NOT EXISTS idx_quote_requests_status ON quote_requests(status);
        CREATE INDEX IF NOT EXISTS idx_quote_requests_created_at ON quote_requests(created_at);"#,
    ),
];

pub async fn create_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    for (name, ddl) in TABLES {
        info!("creating table {name}");
        sqlx::raw_sql(ddl).execute(pool).await?;
    }

    info!("all tables ready");
    Ok(())
}

/// Dev helper: drop everything, children before parents.
pub async fn drop_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    for table in [
        "order_items",
        "orders",
        "support_tickets",
        "quote_requests",
        "services",
        "news",
        "products",
        "employees",
        "admins",
        "users",
    ] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table} CASCADE"))
            .execute(pool)
            .await?;
        info!("dropped table {table}");
    }

    Ok(())
}
