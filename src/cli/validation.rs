use crate::cli::args::CliArgs;

pub const MAX_DEBOUNCE_MS: u64 = 60_000;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(size) = args.page_size {
        crate::engine::parse_page_size(size)
            .map_err(|e| format!("invalid --page-size '{size}': {e}"))?;
    }
    if let Some(raw) = args.scope.as_deref() {
        crate::engine::parse_scope(raw).map_err(|e| format!("invalid --scope '{raw}': {e}"))?;
    }
    if let Some(raw) = args.format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --format '{raw}', expected text or json"));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(ms) = args.debounce_ms {
        if ms > MAX_DEBOUNCE_MS {
            return Err(format!(
                "invalid debounce-ms {ms}, expected at most {MAX_DEBOUNCE_MS}"
            ));
        }
    }
    if let Some(seed) = args.seed.as_deref() {
        if seed.trim().is_empty() {
            return Err("invalid seed, expected a non-empty string".to_string());
        }
    }
    Ok(())
}
