use sqlx::{Row, sqlite::SqliteRow};

use crate::models::*;

/// Map a SQLite row to a Site struct
pub fn map_site_row(row: &SqliteRow) -> Site {
    Site {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a SQLite row to a Rack struct
pub fn map_rack_row(row: &SqliteRow) -> Rack {
    let is_hub: i32 = row.get("is_hub");
    Rack {
        id: row.get("id"),
        site_id: row.get("site_id"),
        name: row.get("name"),
        is_hub: is_hub == 1,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a SQLite row to a Device struct
pub fn map_device_row(row: &SqliteRow) -> Device {
    Device {
        id: row.get("id"),
        site_id: row.get("site_id"),
        rack_id: row.try_get::<Option<i64>, _>("rack_id").ok().flatten(),
        name: row.get("name"),
        role: row.get("role"),
        remote_panel_id: row.try_get::<Option<i64>, _>("remote_panel_id").ok().flatten(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a SQLite row (ports joined with devices) to a Port struct
pub fn map_port_row(row: &SqliteRow) -> Port {
    let kind: String = row.get("kind");
    Port {
        id: row.get("id"),
        device_id: row.get("device_id"),
        name: row.get("name"),
        kind: PortKind::from_db(&kind),
        port_type: row.get("port_type"),
        positions: row.get("positions"),
        rear_port_id: row.try_get::<Option<i64>, _>("rear_port_id").ok().flatten(),
        rear_port_position: row.try_get::<Option<i32>, _>("rear_port_position").ok().flatten(),
        cable_id: row.try_get::<Option<i64>, _>("cable_id").ok().flatten(),
        device_name: row.get("device_name"),
        rack_id: row.try_get::<Option<i64>, _>("rack_id").ok().flatten(),
    }
}

/// Map a SQLite row (with comma-joined `tags`) to a Cable struct
pub fn map_cable_row(row: &SqliteRow) -> Cable {
    let tags: String = row.get("tags");
    Cable {
        id: row.get("id"),
        a_port_id: row.get("a_port_id"),
        b_port_id: row.get("b_port_id"),
        label: row.get("label"),
        status: row.get("status"),
        cable_type: row.get("cable_type"),
        length: row.try_get::<Option<i32>, _>("length").ok().flatten(),
        length_unit: row.get("length_unit"),
        tags: tags
            .split(',')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        created_at: row.get("created_at"),
    }
}
