//! Tests for the core identifier and metadata types
//!
//! These cover the closed set of block types, block ids, and how metadata
//! and instances look on the wire.

#[cfg(test)]
mod core_tests {
    use serde_json::json;

    use crate::categories::BlockCategory;
    use crate::core::block::{BlockError, Complexity, StoredBlock};
    use crate::core::{BlockId, BlockRegistry, BlockTypeId, Settings};

    /// Test BlockId generation and uniqueness
    ///
    /// Each new BlockId is a random UUID v4.
    #[test]
    fn test_block_id_creation_and_uniqueness() {
        let id1 = BlockId::new();
        let id2 = BlockId::new();

        assert_ne!(id1, id2, "Block IDs should be unique");
        assert!(uuid::Uuid::parse_str(id1.as_str()).is_ok());
    }

    /// Stored ids are kept verbatim, whatever their format
    #[test]
    fn test_block_id_serialization() {
        let id = BlockId::from("legacy-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"legacy-42\"");

        let back: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_block_type_wire_names() {
        for t in BlockTypeId::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, json!(t.as_str()));
            assert_eq!(t.as_str().parse::<BlockTypeId>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
        assert_eq!(BlockTypeId::ALL.len(), BlockTypeId::COUNT);
    }

    #[test]
    fn test_unknown_type_id_parse_error() {
        let err = "Multiple-Choice".parse::<BlockTypeId>().unwrap_err();
        assert_eq!(err, BlockError::UnknownBlockType("Multiple-Choice".into()));
    }

    #[test]
    fn test_category_display_and_wire_name() {
        assert_eq!(BlockCategory::Interaction.as_str(), "interaction");
        assert_eq!(serde_json::to_value(BlockCategory::Media).unwrap(), json!("media"));
        assert_eq!(BlockCategory::ALL.len(), 5);
        assert_eq!(Complexity::Moderate.to_string(), "moderate");
    }

    /// Metadata serializes with the field names the frontend expects
    #[test]
    fn test_metadata_wire_format() {
        let meta = BlockRegistry::global().get(BlockTypeId::CardSort).unwrap();
        let json = serde_json::to_value(meta).unwrap();

        assert_eq!(json["type"], "card-sort");
        assert_eq!(json["displayName"], "Card Sort");
        assert_eq!(json["category"], "interaction");
        assert_eq!(json["estimatedDurationSeconds"], 300);
        assert_eq!(json["complexity"], "complex");
        assert_eq!(json["requiresInteraction"], true);
        assert!(json["validationRule"]["fields"].is_array());
    }

    /// An instance converts to a stored document and back unchanged
    #[test]
    fn test_instance_to_stored_block() {
        let registry = BlockRegistry::global();
        let block = registry.create_block("context-screen", Settings::new()).unwrap();

        let stored = StoredBlock::from(block.clone());
        let text = serde_json::to_string(&stored).unwrap();
        let parsed: StoredBlock = serde_json::from_str(&text).unwrap();

        let restored = registry.restore(parsed).unwrap();
        assert_eq!(restored, block);
    }

    #[test]
    fn test_touch_moves_updated_at() {
        let mut block = BlockRegistry::global()
            .create_block("thank-you", Settings::new())
            .unwrap();
        let created = block.created_at;
        block.touch();
        assert!(block.updated_at >= created);
        assert_eq!(block.created_at, created);
    }
}
