use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayoutError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LayoutError::decode("x").to_string().contains("decode error:"));
    assert!(LayoutError::render("x").to_string().contains("render error:"));
    assert!(LayoutError::encode("x").to_string().contains("encode error:"));
    assert!(
        LayoutError::archive("x")
            .to_string()
            .contains("archive error:")
    );
    assert!(LayoutError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    fn inner() -> LayoutResult<()> {
        use anyhow::Context as _;
        std::fs::read("/definitely/not/a/real/path/layoutpack")
            .context("read missing file")?;
        Ok(())
    }

    let err = inner().unwrap_err();
    assert!(matches!(err, LayoutError::Other(_)));
    assert!(err.to_string().contains("read missing file"));
}
