//! Drawing kinds. A project holds at most one drawing of each kind.

pub const DRAWING_TYPES: &[&str] = &[
    "네이버도면",
    "건축도면",
    "평면도",
    "3D도면",
    "철거도면",
    "전기도면",
    "설비도면",
    "목공도면",
    "타일도면",
    "금속도면",
    "가구도면",
    "세라믹도면",
    "디테일도면",
    "천장도면",
];

pub fn is_valid_drawing_type(kind: &str) -> bool {
    DRAWING_TYPES.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourteen_kinds() {
        assert_eq!(DRAWING_TYPES.len(), 14);
        assert!(is_valid_drawing_type("평면도"));
        assert!(!is_valid_drawing_type("평면"));
    }
}
