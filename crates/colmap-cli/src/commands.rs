use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use colmap_cli::input::{load_mapping, load_profile, read_header};
use colmap_client::{FormSelection, HttpSuggestionSource, ImportForm, MappingApplier};
use colmap_map::{ConfidenceThresholds, SuggestionEngine, SuggestionService, validate_mapping};
use colmap_model::SuggestResponse;

use crate::cli::{ApplyArgs, FieldsArgs, RankArgs, SuggestArgs, ValidateArgs};
use crate::summary::{
    print_fields, print_form, print_ranking, print_suggestions, print_validation,
};

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let span = info_span!("suggest", csv = %args.csv.display());
    let _guard = span.enter();

    let columns = read_header(&args.csv)?;
    let profile = load_profile(args.profile.as_deref())?;
    let mut config = profile.matching.unwrap_or_default();
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    let engine = SuggestionEngine::new(config).context("matching configuration")?;
    let thresholds = ConfidenceThresholds::from_threshold(engine.config().threshold);
    let service = SuggestionService::with_engine(profile, engine)?;

    let report = service.report(&columns)?;
    if args.json {
        let response = SuggestResponse::new(report.mapping());
        println!("{}", response.to_json()?);
    } else {
        print_suggestions(&report, service.profile(), &thresholds);
    }
    Ok(())
}

pub fn run_rank(args: &RankArgs) -> Result<()> {
    let span = info_span!("rank", csv = %args.csv.display(), field = %args.field);
    let _guard = span.enter();

    let columns = read_header(&args.csv)?;
    let profile = load_profile(args.profile.as_deref())?;
    let Some(field) = profile.field(&args.field) else {
        bail!("profile `{}` has no field `{}`", profile.name, args.field);
    };
    let engine = SuggestionEngine::for_profile(&profile).context("matching configuration")?;
    let ranked = engine.rank_columns(field, &columns);
    let explanations: Vec<String> = ranked
        .iter()
        .map(|candidate| engine.explain(field, &candidate.column).explain())
        .collect();
    print_ranking(field, &ranked, &explanations, engine.config().threshold);
    Ok(())
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let profile = load_profile(args.profile.as_deref())?;
    print_fields(&profile);
    Ok(())
}

/// Returns whether the mapping is free of errors.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let span = info_span!("validate", csv = %args.csv.display());
    let _guard = span.enter();

    let columns = read_header(&args.csv)?;
    let profile = load_profile(args.profile.as_deref())?;
    let mapping = load_mapping(&args.mapping)?;
    let report = validate_mapping(&profile, &mapping, &columns);
    info!(
        fields = mapping.len(),
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "validated mapping"
    );
    print_validation(&report);
    Ok(report.is_valid())
}

/// Fills a fresh import form from the endpoint and prints it.
///
/// A failed suggestion request is not an error.
pub fn run_apply(args: &ApplyArgs) -> Result<()> {
    let span = info_span!("apply", csv = %args.csv.display(), endpoint = %args.endpoint);
    let _guard = span.enter();

    let columns = read_header(&args.csv)?;
    let profile = load_profile(args.profile.as_deref())?;
    let mut form = ImportForm::from_profile(&profile, &columns);
    for (field, column) in &args.presets {
        if !form.has_selector(field) {
            bail!("--preset names unknown field `{field}`");
        }
        if !columns.contains(column) {
            warn!(field = %field, column = %column, "preset column is not in the CSV header");
        }
        form.select(field, column);
    }
    form.subscribe(|change| {
        debug!(
            field = %change.field,
            value = change.value.as_deref().unwrap_or(""),
            origin = ?change.origin,
            "selector changed"
        );
    });

    let source = match args.timeout {
        Some(seconds) => {
            let timeout = Duration::try_from_secs_f64(seconds)
                .with_context(|| format!("invalid --timeout {seconds}"))?;
            HttpSuggestionSource::with_timeout(&args.endpoint, timeout)?
        }
        None => HttpSuggestionSource::new(&args.endpoint)?,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let form = Mutex::new(form);
    let mut applier = MappingApplier::new(source);
    let outcome = runtime.block_on(applier.apply(&form, &columns));

    let form = form.into_inner().unwrap_or_else(PoisonError::into_inner);
    print_form(&form, &outcome, applier.state());
    Ok(())
}
