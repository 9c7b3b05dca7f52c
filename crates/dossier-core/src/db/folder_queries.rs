//! Folder CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Folder, FolderFilter},
};

const INSERT_FOLDER_SQL: &str =
    "INSERT INTO folders (name, drawer, cabinet, box_label, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const CHECK_FOLDER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM folders WHERE id = ?1)";
const FOLDER_COLUMNS: &str = "f.id, f.name, f.drawer, f.cabinet, f.box_label, f.created_at, \
     (SELECT COUNT(*) FROM records r WHERE r.folder_id = f.id) AS record_count";
const DELETE_FOLDER_SQL: &str = "DELETE FROM folders WHERE id = ?1";

/// Whether a folder with `id` exists.
pub(super) fn folder_exists(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(CHECK_FOLDER_EXISTS_SQL, params![id as i64], |row| row.get(0))
        .db_context("Failed to check folder existence")
}

impl super::Database {
    fn build_folder_from_row(row: &rusqlite::Row) -> rusqlite::Result<Folder> {
        Ok(Folder {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            drawer: row.get(2)?,
            cabinet: row.get(3)?,
            box_label: row.get(4)?,
            created_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?,
            record_count: row.get::<_, i64>(6)? as u32,
        })
    }

    pub(super) fn fetch_folder(conn: &Connection, id: u64) -> Result<Option<Folder>> {
        let query = format!("SELECT {FOLDER_COLUMNS} FROM folders f WHERE f.id = ?1");
        conn.query_row(&query, params![id as i64], Self::build_folder_from_row)
            .optional()
            .db_context("Failed to query folder")
    }

    /// Creates a folder at the given location.
    pub fn create_folder(
        &mut self,
        name: &str,
        drawer: Option<&str>,
        cabinet: Option<&str>,
        box_label: Option<&str>,
    ) -> Result<Folder> {
        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_FOLDER_SQL,
                params![name, drawer, cabinet, box_label, now.to_string()],
            )
            .db_context("Failed to insert folder")?;

        let id = self.connection.last_insert_rowid() as u64;
        log::debug!("Created folder {id} ({name})");

        Ok(Folder {
            id,
            name: name.into(),
            drawer: drawer.map(String::from),
            cabinet: cabinet.map(String::from),
            box_label: box_label.map(String::from),
            record_count: 0,
            created_at: now,
        })
    }

    /// Retrieves a folder by its ID, with its record count.
    pub fn get_folder(&self, id: u64) -> Result<Option<Folder>> {
        Self::fetch_folder(&self.connection, id)
    }

    /// Lists folders, optionally restricted to a drawer, cabinet or box.
    pub fn list_folders(&self, filter: Option<&FolderFilter>) -> Result<Vec<Folder>> {
        let mut query = format!("SELECT {FOLDER_COLUMNS} FROM folders f");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref drawer) = f.drawer {
                conditions.push("f.drawer = ?");
                params_vec.push(Box::new(drawer.clone()));
            }
            if let Some(ref cabinet) = f.cabinet {
                conditions.push("f.cabinet = ?");
                params_vec.push(Box::new(cabinet.clone()));
            }
            if let Some(ref box_label) = f.box_label {
                conditions.push("f.box_label = ?");
                params_vec.push(Box::new(box_label.clone()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY f.drawer, f.cabinet, f.box_label, f.name, f.id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare folder query")?;

        let param_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let folders = stmt
            .query_map(&param_refs[..], Self::build_folder_from_row)
            .db_context("Failed to query folders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect folders")?;

        Ok(folders)
    }

    /// Deletes an empty folder. Returns the deleted folder.
    ///
    /// Folders that still hold records are refused; move or delete the
    /// records first.
    pub fn delete_folder(&mut self, id: u64) -> Result<Folder> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let folder = Self::fetch_folder(&tx, id)?.ok_or(TrackerError::FolderNotFound { id })?;

        if folder.record_count > 0 {
            return Err(TrackerError::invalid_input("id").with_reason(format!(
                "Folder {id} still holds {} record(s)",
                folder.record_count
            )));
        }

        tx.execute(DELETE_FOLDER_SQL, params![id as i64])
            .db_context("Failed to delete folder")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(folder)
    }
}
