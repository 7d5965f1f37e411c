/// 集合查询的选择器
pub const ALL_SELECTOR: &str = "all";

/// 生成实体缓存键
///
/// 带 id 时为 `<type>:<id>`，否则为 `<type>:all`。
/// 路由层只放行数字 id，所以 id 不会与 `all` 冲突。
pub fn derive_key(entity_type: &str, id: Option<&str>) -> String {
    match id {
        Some(id) if !id.is_empty() => format!("{}:{}", entity_type, id),
        _ => format!("{}:{}", entity_type, ALL_SELECTOR),
    }
}
