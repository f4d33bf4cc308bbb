use heatcal::{Granularity, HeatcalError, Heatmap, HeatmapConfig, Rgb};
use heatcal_mock::RecordingRenderer;

#[test]
fn renderer_is_required() {
    let err = Heatmap::builder().build().err().expect("missing renderer");
    assert!(matches!(err, HeatcalError::InvalidArg(_)));
}

#[test]
fn color_strings_are_parsed_at_build() {
    let (renderer, _c) = RecordingRenderer::new_with_controller("rec");
    let heatmap = Heatmap::builder()
        .renderer(renderer)
        .color("#1e90ff")
        .build()
        .unwrap();
    assert_eq!(heatmap.config().color, Rgb::new(0x1e, 0x90, 0xff));

    let (renderer, _c) = RecordingRenderer::new_with_controller("rec");
    let err = Heatmap::builder()
        .renderer(renderer)
        .color("not-a-color")
        .build()
        .err()
        .expect("bad color");
    assert!(matches!(err, HeatcalError::InvalidColor(_)));
}

#[test]
fn invalid_config_is_rejected() {
    let (renderer, _c) = RecordingRenderer::new_with_controller("rec");
    let cfg = HeatmapConfig {
        min_width: 0.0,
        ..HeatmapConfig::default()
    };
    let err = Heatmap::builder()
        .renderer(renderer)
        .config(cfg)
        .build()
        .err()
        .expect("invalid config");
    assert!(matches!(err, HeatcalError::InvalidArg(_)));
}

#[test]
fn overview_sets_the_initial_view() {
    let (renderer, _c) = RecordingRenderer::new_with_controller("rec");
    let heatmap = Heatmap::builder()
        .renderer(renderer)
        .overview(Granularity::Month)
        .seed(3)
        .build()
        .unwrap();
    assert_eq!(heatmap.selection().granularity, Granularity::Month);
    assert_eq!(heatmap.history(), &[Granularity::Year, Granularity::Month]);
    assert!(heatmap.scene().is_none());
}

#[test]
fn data_without_width_is_held_until_a_width_arrives() {
    let (renderer, _c) = RecordingRenderer::new_with_controller("rec");
    let mut heatmap = Heatmap::builder().renderer(renderer).seed(5).build().unwrap();
    let today = chrono::Utc::now().date_naive();
    tokio_test::block_on(heatmap.set_data(heatcal_mock::fixtures::trailing_year(today))).unwrap();
    assert!(heatmap.scene().is_none());
    assert!(!heatmap.is_locked());
    assert_eq!(heatmap.records().len(), heatmap.records().iter().filter(|r| r.summary.is_some()).count());
}
