use serde_json::Value;
use tauri::{path::BaseDirectory, Manager};
use tauri_plugin_dialog::DialogExt;

use jaqled_core::edit::FilterEdit;
use jaqled_core::FilterState;

/// Decode an item into the typed editing view. Items the view cannot
/// represent fall back to `None` and render as unsupported.
fn decode_state(item: Value) -> Option<FilterState> {
    serde_json::from_value(item).ok()
}

/// Current member list of an item, for the member commands to start from.
fn current_members(item: &Value) -> Vec<String> {
    item.pointer("/jaql/filter/members")
        .and_then(Value::as_array)
        .map(|members| {
            members
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[tauri::command]
fn parse_filters(input: String) -> Result<Vec<Value>, String> {
    let items = jaqled_core::doc::parse_document(&input).map_err(|e| e.to_string())?;
    if !jaqled_core::doc::validate_structure(&items) {
        return Err(jaqled_core::doc::DocumentError::Structure.to_string());
    }
    Ok(items)
}

#[tauri::command]
fn update_filter_value(item: Value, field_path: String, value: Value) -> Value {
    jaqled_core::edit::update_filter_value(&item, &field_path, value)
}

#[tauri::command]
fn apply_edit(item: Value, edit: FilterEdit) -> Value {
    jaqled_core::edit::apply_edit(&item, &edit)
}

#[tauri::command]
fn set_member(item: Value, index: usize, value: String) -> Value {
    let members = jaqled_core::edit::set_member(&current_members(&item), index, value);
    jaqled_core::edit::apply_edit(&item, &FilterEdit::Members(members))
}

#[tauri::command]
fn add_member(item: Value) -> Value {
    let members = jaqled_core::edit::add_member(&current_members(&item));
    jaqled_core::edit::apply_edit(&item, &FilterEdit::Members(members))
}

#[tauri::command]
fn remove_member(item: Value, index: usize) -> Value {
    let members = jaqled_core::edit::remove_member(&current_members(&item), index);
    jaqled_core::edit::apply_edit(&item, &FilterEdit::Members(members))
}

#[tauri::command]
fn filter_title(item: Value) -> String {
    jaqled_core::doc::filter_title(&item)
}

#[tauri::command]
fn filter_kind(item: Value) -> String {
    decode_state(item)
        .map(|state| state.item.kind().as_str().to_string())
        .unwrap_or_else(|| "unsupported".to_string())
}

#[tauri::command]
fn filter_datatype(item: Value) -> String {
    decode_state(item)
        .and_then(|state| state.item.jaql.and_then(|jaql| jaql.datatype))
        .unwrap_or_else(|| "text".to_string())
}

#[tauri::command]
fn visible_members(item: Value) -> Vec<String> {
    decode_state(item)
        .and_then(|state| {
            state
                .item
                .jaql
                .map(|jaql| jaqled_core::edit::visible_members(&jaql.filter).to_vec())
        })
        .unwrap_or_default()
}

#[tauri::command]
fn can_add_member(item: Value) -> bool {
    decode_state(item)
        .and_then(|state| {
            state
                .item
                .jaql
                .map(|jaql| jaqled_core::edit::can_add_member(&jaql.filter))
        })
        .unwrap_or(false)
}

#[tauri::command]
fn is_date_datatype(datatype: String) -> bool {
    jaqled_core::dates::is_date_datatype(&datatype)
}

#[tauri::command]
fn format_date_display(value: String) -> String {
    jaqled_core::dates::to_display_date(&value)
}

#[tauri::command]
fn format_date_storage(value: String) -> String {
    jaqled_core::dates::to_storage_date(&value)
}

#[tauri::command]
fn export_filters(items: Vec<Value>) -> String {
    jaqled_core::doc::export_document(&items)
}

/// Save dialog for "Download JSON". Returns the written path, or None when
/// the user cancels.
#[tauri::command]
fn save_export(app: tauri::AppHandle, json: String) -> Result<Option<String>, String> {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let file_name = jaqled_core::doc::export_file_name(&date);

    let picked = app
        .dialog()
        .file()
        .set_file_name(&file_name)
        .add_filter("JSON", &["json"])
        .blocking_save_file();
    let Some(picked) = picked else {
        return Ok(None);
    };

    let path = picked.into_path().map_err(|e| e.to_string())?;
    jaqled_core::doc::write_export(&path, &json)?;
    eprintln!("[jaqled] export written to {}", path.display());
    Ok(Some(path.display().to_string()))
}

#[tauri::command]
fn list_samples(app: tauri::AppHandle) -> Result<Vec<String>, String> {
    let dir = app
        .path()
        .resolve("samples", BaseDirectory::Resource)
        .map_err(|e| e.to_string())?;
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .map_err(|e| e.to_string())?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name().to_string_lossy().to_string();
            name.strip_suffix(".json").map(|n| n.to_string())
        })
        .collect();
    names.sort();
    Ok(names)
}

#[tauri::command]
fn load_sample(app: tauri::AppHandle, name: String) -> Result<String, String> {
    let path = app
        .path()
        .resolve(format!("samples/{}.json", name), BaseDirectory::Resource)
        .map_err(|e| e.to_string())?;
    std::fs::read_to_string(&path).map_err(|e| e.to_string())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            parse_filters,
            update_filter_value,
            apply_edit,
            set_member,
            add_member,
            remove_member,
            filter_title,
            filter_kind,
            filter_datatype,
            visible_members,
            can_add_member,
            is_date_datatype,
            format_date_display,
            format_date_storage,
            export_filters,
            save_export,
            list_samples,
            load_sample,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
