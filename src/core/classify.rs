use super::record::ObjectType;

/// Guess the kind of database object from its (possibly schema-qualified) name.
///
/// Only the segment after the last dot is inspected. The checks are plain
/// substring tests, so `"dbo.CuspRates"` classifies as a stored procedure because
/// it contains `usp`.
pub fn classify_object(name: Option<&str>) -> Option<ObjectType> {
    let name = name?;
    if name.is_empty() {
        return None;
    }

    let lowered = name.to_lowercase();
    let leaf = lowered.rsplit('.').next().unwrap_or(&lowered);

    let object_type = if leaf.contains("usp") || leaf.starts_with("sp_") {
        ObjectType::StoredProcedure
    } else if leaf.contains("vw") || leaf.contains("view") {
        ObjectType::View
    } else {
        ObjectType::Unknown
    };
    Some(object_type)
}
