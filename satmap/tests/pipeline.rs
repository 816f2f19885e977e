use chrono::{TimeZone, Utc};
use image::{ImageFormat, Rgb, RgbImage};
use satmap_lib::{
    catalog::load_catalogs,
    config::{BasemapConfig, Config, DEFAULT_CATALOG_URLS},
    fetch::StaticFetcher,
    figure::Layer,
    geolocation::resolve_location,
    observer::observer_from_location,
    pipeline::{self, PlotType},
    propagation::compute_positions,
    render::save_figure,
};
use std::io::Cursor;
use url::Url;

const IPINFO: &str = r#"{"ip": "192.0.2.1", "city": "Null Island", "region": "Atlantic", "loc": "0.0000,0.0000"}"#;

const CATALOGS: &[&str] = &[
    "GPS BIIR-2  (PRN 13)
1 24876U 97035A   23190.50000000  .00000000  00000-0  00000-0 0  9991
2 24876  55.6670 108.1760 0045000  55.0000 305.5000  2.00563000190009
",
    "COSMOS 2425 (716)
1 29670U 06062A   23190.50000000  .00000000  00000-0  00000-0 0  9998
2 29670  65.3000 252.1000 0012000 250.0000 110.0000  2.13102000130005
",
    "GSAT0101 (GALILEO-PFM)
1 37846U 11060A   23190.50000000  .00000000  00000-0  00000-0 0  9996
2 37846  57.0000  12.5000 0003000 320.0000  40.0000  1.70475000 75008
",
    "BEIDOU-3 M1
1 43001U 17069A   23190.50000000  .00000000  00000-0  00000-0 0  9991
2 43001  55.2000 170.3000 0005000  10.0000 350.0000  1.86230000 39009
",
    "SES-5 (SBAS)
1 38652U 12036A   23190.50000000  .00000000  00000-0  00000-0 0  9996
2 38652   0.0400  90.0000 0002500 200.0000 160.0000  1.00270000 40009
",
];

const COASTLINES_URL: &str = "https://example.com/coastlines.geojson";
const IMAGERY_URL: &str = "https://example.com/earth.png";

const COASTLINES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[-10.0, 50.0], [0.0, 51.0]]}}
  ]
}"#;

fn earth_png() -> Vec<u8> {
    let img = RgbImage::from_fn(8, 4, |x, _| {
        if x < 4 {
            Rgb([0, 90, 0])
        } else {
            Rgb([0, 0, 120])
        }
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn fetcher() -> StaticFetcher {
    let mut f = StaticFetcher::new()
        .with(Url::parse("http://ipinfo.io/json").unwrap(), IPINFO)
        .with(Url::parse(COASTLINES_URL).unwrap(), COASTLINES)
        .with(Url::parse(IMAGERY_URL).unwrap(), earth_png());
    for (url, body) in DEFAULT_CATALOG_URLS.iter().zip(CATALOGS) {
        f.insert(Url::parse(url).unwrap(), *body);
    }
    f
}

fn config() -> Config {
    Config {
        basemap: BasemapConfig {
            coastlines: Some(COASTLINES_URL.to_owned()),
            imagery: Some(IMAGERY_URL.to_owned()),
        },
        ..Default::default()
    }
}

fn obs_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, 10, 12, 0, 0).unwrap()
}

#[test]
fn five_groups_of_one_satellite() {
    let f = fetcher();
    let cfg = config();
    let groups = load_catalogs(&f, &cfg.catalogs).unwrap();
    assert_eq!(groups.len(), 5);
    assert!(groups.iter().all(|g| g.satellites.len() == 1));
    let names: Vec<String> = groups.names().map(|n| n.to_string()).collect();
    assert_eq!(names, ["GPS-OPS", "GLO-OPS", "GALILEO", "BEIDOU", "SBAS"]);

    let location = resolve_location(&f, &cfg.geolocation_url).unwrap();
    let observer = observer_from_location(&location, Some(obs_time())).unwrap();
    assert_eq!(observer.latitude, 0.0);
    assert_eq!(observer.longitude, 0.0);

    let arena = compute_positions(&groups, &observer).unwrap();
    assert_eq!(arena.len(), 5);
    for (_, p) in arena.iter() {
        assert!(p.look.elevation.abs() <= std::f64::consts::FRAC_PI_2);
        assert!(p.range > 1.0e7, "GNSS orbits are beyond 10,000 km");
    }
}

#[test]
fn polar_view_shows_only_satellites_above_horizon() {
    let fig = pipeline::run(&fetcher(), &config(), PlotType::PolarAzel, Some(obs_time())).unwrap();
    assert_eq!(
        fig.title.as_deref(),
        Some("Visible Satellites above Null Island, Atlantic at 10 Jul 2023 12:00:00 (UTC)")
    );
    assert_eq!(fig.scatter_layers().count(), 5);
    let plotted: usize = fig
        .scatter_layers()
        .map(|l| match l {
            Layer::Scatter { points, .. } => points.len(),
            _ => 0,
        })
        .sum();
    let names = [
        "GPS BIIR-2  (PRN 13)",
        "COSMOS 2425 (716)",
        "GSAT0101 (GALILEO-PFM)",
        "BEIDOU-3 M1",
        "SES-5 (SBAS)",
    ];
    let labelled: Vec<_> = fig
        .annotations()
        .filter(|(_, text)| names.contains(text))
        .collect();
    assert_eq!(labelled.len(), plotted);
    for (&(x, y), _) in labelled {
        assert!(x.hypot(y) < 90.0);
    }
    assert!(fig.legend.is_empty());
}

#[test]
fn ground_track_view_plots_every_satellite() {
    let fig = pipeline::run(&fetcher(), &config(), PlotType::GroundTrack, Some(obs_time())).unwrap();
    assert_eq!(
        fig.title.as_deref(),
        Some("Visible Satellites at 10 Jul 2023 12:00:00 (UTC)")
    );
    assert!(matches!(fig.layers.first(), Some(Layer::Raster(_))));
    assert!(fig.layers.iter().any(|l| matches!(l, Layer::Area { .. })));
    assert!(fig.layers.iter().any(|l| matches!(l, Layer::Polyline { .. })));
    for l in fig.scatter_layers() {
        if let Layer::Scatter { points, label, .. } = l {
            assert_eq!(points.len(), 1);
            assert!(label.is_some());
        }
    }
    assert_eq!(fig.legend.len(), 5);
}

#[test]
fn missing_catalog_fails_the_run() {
    let f = fetcher();
    let cfg = Config {
        catalogs: vec![Url::parse("https://example.com/missing.txt").unwrap()],
        ..config()
    };
    assert!(matches!(
        pipeline::run(&f, &cfg, PlotType::PolarAzel, Some(obs_time())),
        Err(satmap_lib::Error::Network(_))
    ));
}

#[test]
fn saves_bitmap() {
    let mut fig =
        pipeline::run(&fetcher(), &config(), PlotType::GroundTrack, Some(obs_time())).unwrap();
    // Keep to shapes only, no fonts needed
    fig.title = None;
    fig.legend.clear();

    let path = std::env::temp_dir().join(format!("satmap-ground-track-{}.png", std::process::id()));
    save_figure(&fig, &path, 20.0).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), fig.pixel_size(20.0));
    std::fs::remove_file(&path).unwrap();
}
