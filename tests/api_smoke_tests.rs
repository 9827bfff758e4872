use std::time::Duration;

use bar_chart_rs::core::{RevealPhase, SourceTable};
use bar_chart_rs::render::RecordingRenderer;
use bar_chart_rs::{BarChart, BarChartConfig, telemetry};

#[test]
fn chart_smoke_flow() {
    let _ = telemetry::init_default_tracing();

    let csv = "Month,Plays,Skips\nJan,820,140\nFeb,640,95\nMar,910,210\n";
    let source = SourceTable::from_csv_reader(csv.as_bytes(), Some("Listening")).expect("csv");
    let mut chart =
        BarChart::build(&source, RecordingRenderer::default(), BarChartConfig::default())
            .expect("chart build");

    assert_eq!(chart.table().caption, "Listening");
    assert_eq!(chart.geometry().y_max, 100.0);
    assert_eq!(chart.geometry().group_count(), 2);
    assert_eq!(chart.reveal_state().phase, RevealPhase::Idle);

    chart
        .advance_by(Duration::from_millis(250))
        .expect("advance");
    assert_eq!(chart.reveal_state().phase, RevealPhase::Revealing);

    chart.reset().expect("reset");
    chart.run_to_completion().expect("run");
    assert_eq!(chart.reveal_state().cursor, 6);
    assert_eq!(chart.reveal_state().phase, RevealPhase::Complete);

    // 820 / 100 * 100 lands just under 820 in binary floating point.
    let renderer = chart.into_renderer();
    assert_eq!(renderer.bar_heights(), &[819.0, 640.0, 910.0, 140.0, 95.0, 210.0]);
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_init_is_noop_without_feature() {
    assert!(!telemetry::init_default_tracing());
    assert!(!telemetry::init_tracing_with_fallback("debug"));
}
