use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::models::{Document, DocumentKind, Metadata};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_str() -> String {
    Utc::now().naive_utc().format(TS_FORMAT).to_string()
}

// ── Documents ──

/// Inserts a document unless one with the same id exists. Returns `false`
/// when the existing document was left untouched.
pub fn add_document(conn: &Connection, doc: &Document) -> anyhow::Result<bool> {
    let metadata = serde_json::to_string(&doc.metadata)?;
    let created_at = doc.created_at.format(TS_FORMAT).to_string();
    let updated_at = doc.updated_at.format(TS_FORMAT).to_string();

    let count = conn.execute(
        "INSERT OR IGNORE INTO documents (id, kind, document, metadata, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            doc.id,
            doc.kind.as_str(),
            doc.document,
            metadata,
            created_at,
            updated_at,
        ],
    )?;
    Ok(count > 0)
}

/// Inserts or replaces text and metadata, keeping the original `created_at`.
pub fn upsert_document(conn: &Connection, doc: &Document) -> anyhow::Result<()> {
    let metadata = serde_json::to_string(&doc.metadata)?;
    let created_at = doc.created_at.format(TS_FORMAT).to_string();
    let updated_at = doc.updated_at.format(TS_FORMAT).to_string();

    conn.execute(
        "INSERT INTO documents (id, kind, document, metadata, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
           kind = excluded.kind,
           document = excluded.document,
           metadata = excluded.metadata,
           updated_at = excluded.updated_at",
        params![
            doc.id,
            doc.kind.as_str(),
            doc.document,
            metadata,
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: &str) -> anyhow::Result<Option<Document>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, document, metadata, created_at, updated_at FROM documents WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], parse_document_row) {
        Ok(doc) => Ok(doc),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Merges `patch` into the stored metadata and rewrites the document text.
/// Returns `false` if no document has that id.
pub fn update_document(
    conn: &Connection,
    id: &str,
    document: &str,
    patch: &Metadata,
) -> anyhow::Result<bool> {
    let patch_json = serde_json::to_string(patch)?;
    let count = conn.execute(
        "UPDATE documents SET document = ?1, metadata = json_patch(metadata, ?2), updated_at = ?3
         WHERE id = ?4",
        params![document, patch_json, now_str(), id],
    )?;
    Ok(count > 0)
}

/// Lists documents of one kind whose metadata matches every `(key, value)` pair.
pub fn list_documents(
    conn: &Connection,
    kind: DocumentKind,
    filter: &[(&str, &str)],
) -> anyhow::Result<Vec<Document>> {
    let mut sql = String::from(
        "SELECT id, kind, document, metadata, created_at, updated_at FROM documents WHERE kind = ?1",
    );
    let mut values: Vec<String> = vec![kind.as_str().to_string()];

    for (key, value) in filter {
        sql.push_str(&format!(
            " AND json_extract(metadata, ?{}) = ?{}",
            values.len() + 1,
            values.len() + 2
        ));
        values.push(format!("$.{key}"));
        values.push((*value).to_string());
    }
    sql.push_str(" ORDER BY created_at ASC, rowid ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), parse_document_row)?;

    let mut docs = vec![];
    for row in rows {
        if let Some(doc) = row? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

pub fn count_documents(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_documents_matching(
    conn: &Connection,
    kind: DocumentKind,
    key: &str,
    value: &str,
) -> anyhow::Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE kind = ?1 AND json_extract(metadata, ?2) = ?3",
        params![kind.as_str(), format!("$.{key}"), value],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Rows with an unknown kind are skipped rather than failing the whole scan.
fn parse_document_row(row: &Row<'_>) -> rusqlite::Result<Option<Document>> {
    let kind_str: String = row.get(1)?;
    let Some(kind) = DocumentKind::parse(&kind_str) else {
        return Ok(None);
    };

    let metadata_json: String = row.get(3)?;
    let metadata: Metadata = serde_json::from_str(&metadata_json).unwrap_or_default();

    let created_at_str: String = row.get(4)?;
    let updated_at_str: String = row.get(5)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TS_FORMAT)
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, TS_FORMAT)
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Some(Document {
        id: row.get(0)?,
        kind,
        document: row.get(2)?,
        metadata,
        created_at,
        updated_at,
    }))
}
