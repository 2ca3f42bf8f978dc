//! Canonical table definitions.
//!
//! Each statement is `CREATE ... IF NOT EXISTS` and safe to re-run. Columns
//! introduced after the first release are NOT listed here; they live in
//! [`super::columns`] so existing databases pick them up through
//! `ALTER TABLE`.
//!
//! Timestamps are stored as RFC 3339 text with millisecond precision.

/// `(table, statement)` pairs in dependency order.
pub(crate) const TABLES: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'worker'
                CHECK (role IN ('admin', 'manager', 'fieldManager', 'worker')),
            department TEXT,
            phone TEXT,
            email TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            notify_email INTEGER NOT NULL DEFAULT 1,
            notify_kakao INTEGER NOT NULL DEFAULT 1,
            notify_push INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "projects",
        "CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            client_name TEXT,
            client_phone TEXT,
            client_email TEXT,
            client_address TEXT,
            address TEXT NOT NULL,
            detail_address TEXT,
            latitude REAL,
            longitude REAL,
            start_date TEXT,
            end_date TEXT,
            status TEXT NOT NULL DEFAULT 'planning'
                CHECK (status IN ('planning', 'inProgress', 'completed', 'onHold')),
            budget INTEGER NOT NULL CHECK (budget >= 0),
            actual_cost INTEGER NOT NULL DEFAULT 0,
            manager_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            field_manager_ids TEXT NOT NULL DEFAULT '[]',
            worker_ids TEXT NOT NULL DEFAULT '[]',
            color_code TEXT NOT NULL DEFAULT '#9CA3AF',
            progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
            description TEXT,
            created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
            deleted_at TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "schedules",
        "CREATE TABLE IF NOT EXISTS schedules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER REFERENCES projects(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            type TEXT NOT NULL DEFAULT 'construction'
                CHECK (type IN ('construction', 'material', 'inspection', 'meeting', 'other')),
            phase TEXT,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            all_day INTEGER NOT NULL DEFAULT 0,
            progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
            priority TEXT NOT NULL DEFAULT 'medium'
                CHECK (priority IN ('low', 'medium', 'high')),
            dependencies TEXT NOT NULL DEFAULT '[]',
            reminders TEXT NOT NULL DEFAULT '[]',
            is_completed INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            as_request_id INTEGER,
            description TEXT,
            created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "schedule_assignees",
        "CREATE TABLE IF NOT EXISTS schedule_assignees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            schedule_id INTEGER NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            name TEXT NOT NULL,
            assigned_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (schedule_id, name)
        )",
    ),
    (
        "schedule_comments",
        "CREATE TABLE IF NOT EXISTS schedule_comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            schedule_id INTEGER NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            author_name TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "contractors",
        "CREATE TABLE IF NOT EXISTS contractors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            rank TEXT,
            company_name TEXT,
            name TEXT NOT NULL,
            process TEXT NOT NULL,
            contact TEXT,
            account_number TEXT,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "payment_requests",
        "CREATE TABLE IF NOT EXISTS payment_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL REFERENCES projects(id),
            requested_by_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            requested_by_name TEXT,
            approved_by_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            approved_by_name TEXT,
            processed_by_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            processed_by_name TEXT,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            purpose TEXT,
            process TEXT,
            quick_text TEXT,
            category TEXT NOT NULL
                CHECK (category IN ('material', 'labor', 'equipment', 'transport', 'other')),
            payment_method TEXT NOT NULL DEFAULT 'bankTransfer'
                CHECK (payment_method IN ('bankTransfer', 'cash', 'card', 'other')),
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'reviewing', 'approved', 'on-hold', 'rejected', 'completed')),
            urgency TEXT NOT NULL DEFAULT 'normal'
                CHECK (urgency IN ('normal', 'urgent', 'emergency')),
            account_holder TEXT,
            bank_name TEXT,
            account_number TEXT,
            attachments TEXT NOT NULL DEFAULT '[]',
            request_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            approval_date TEXT,
            completion_date TEXT,
            rejection_reason TEXT,
            notes TEXT,
            receipt_url TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "as_requests",
        "CREATE TABLE IF NOT EXISTS as_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project TEXT NOT NULL,
            client TEXT NOT NULL,
            request_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            site_address TEXT NOT NULL,
            entrance_password TEXT,
            description TEXT,
            scheduled_visit_date TEXT,
            scheduled_visit_time TEXT,
            assigned_to TEXT NOT NULL DEFAULT '[]',
            completion_date TEXT,
            notes TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'completed', 'revisit')),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "construction_payments",
        "CREATE TABLE IF NOT EXISTS construction_payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project TEXT NOT NULL,
            client TEXT NOT NULL,
            total_amount INTEGER NOT NULL CHECK (total_amount >= 0),
            vat_type TEXT NOT NULL DEFAULT 'percentage'
                CHECK (vat_type IN ('percentage', 'amount')),
            vat_percentage INTEGER NOT NULL DEFAULT 100
                CHECK (vat_percentage BETWEEN 0 AND 100),
            vat_amount INTEGER NOT NULL DEFAULT 0 CHECK (vat_amount >= 0),
            payments TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "work_requests",
        "CREATE TABLE IF NOT EXISTS work_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL DEFAULT '',
            due_date TEXT,
            assigned_to TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'in-progress', 'completed', 'cancelled')),
            priority TEXT NOT NULL DEFAULT 'medium'
                CHECK (priority IN ('low', 'medium', 'high')),
            notes TEXT,
            completed_date TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "additional_works",
        "CREATE TABLE IF NOT EXISTS additional_works (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project TEXT NOT NULL,
            description TEXT NOT NULL,
            amount INTEGER NOT NULL,
            date TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "site_logs",
        "CREATE TABLE IF NOT EXISTS site_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project TEXT NOT NULL,
            date TEXT NOT NULL,
            images TEXT NOT NULL DEFAULT '[]',
            notes TEXT NOT NULL DEFAULT '',
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "drawings",
        "CREATE TABLE IF NOT EXISTS drawings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            type TEXT NOT NULL,
            image_url TEXT NOT NULL,
            markers TEXT NOT NULL DEFAULT '[]',
            rooms TEXT NOT NULL DEFAULT '[]',
            naver_type_sqm TEXT,
            naver_type_pyeong TEXT,
            naver_area TEXT,
            created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
            last_modified_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (project_id, type)
        )",
    ),
    (
        "notifications",
        "CREATE TABLE IF NOT EXISTS notifications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            type TEXT NOT NULL,
            title TEXT NOT NULL,
            message TEXT,
            link TEXT,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "kakao_tokens",
        "CREATE TABLE IF NOT EXISTS kakao_tokens (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            access_token TEXT NOT NULL,
            refresh_token TEXT,
            expires_in INTEGER,
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "specbook_categories",
        "CREATE TABLE IF NOT EXISTS specbook_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            sort_order INTEGER NOT NULL DEFAULT 0
        )",
    ),
    (
        "processes",
        "CREATE TABLE IF NOT EXISTS processes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        )",
    ),
    (
        "specbook_items",
        "CREATE TABLE IF NOT EXISTS specbook_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            brand TEXT,
            price TEXT,
            description TEXT,
            image_url TEXT,
            project_id INTEGER REFERENCES projects(id) ON DELETE CASCADE,
            is_library INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
    (
        "execution_records",
        "CREATE TABLE IF NOT EXISTS execution_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER REFERENCES projects(id) ON DELETE SET NULL,
            project_name TEXT NOT NULL,
            author TEXT,
            date TEXT NOT NULL,
            process TEXT,
            item_name TEXT NOT NULL,
            material_cost INTEGER NOT NULL DEFAULT 0,
            labor_cost INTEGER NOT NULL DEFAULT 0,
            vat_amount INTEGER NOT NULL DEFAULT 0,
            total_amount INTEGER NOT NULL DEFAULT 0,
            notes TEXT,
            payment_id INTEGER REFERENCES payment_requests(id) ON DELETE SET NULL,
            images TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    ),
];

/// Secondary indexes, created after the tables.
pub(crate) const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_contractors_name ON contractors (name)",
    "CREATE INDEX IF NOT EXISTS idx_contractors_process ON contractors (process)",
    "CREATE INDEX IF NOT EXISTS idx_schedules_project ON schedules (project_id)",
    "CREATE INDEX IF NOT EXISTS idx_payment_requests_project ON payment_requests (project_id)",
    "CREATE INDEX IF NOT EXISTS idx_payment_requests_status ON payment_requests (status)",
    "CREATE INDEX IF NOT EXISTS idx_site_logs_project_date ON site_logs (project, date)",
    "CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications (user_id, is_read)",
    "CREATE INDEX IF NOT EXISTS idx_specbook_items_category ON specbook_items (category)",
    "CREATE INDEX IF NOT EXISTS idx_execution_records_project ON execution_records (project_id)",
    "CREATE INDEX IF NOT EXISTS idx_execution_records_date ON execution_records (date)",
];
