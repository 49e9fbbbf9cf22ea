use mongodb::bson::oid::ObjectId;

/// A new 24-digit hex document id.
///
/// Ids are generated here rather than by either backend, so a document keeps its id whichever
/// backend stores it.
pub fn new_id() -> String {
    ObjectId::new().to_hex()
}
