use std::cell::RefCell;

use gameshelf_catalog::{Format, GameGateway, PLACEHOLDER_IMAGE_URL, Platform, Status};
use gameshelf_db::LocalGateway;
use gameshelf_import::*;
use gameshelf_lookup::{
    CatalogDetails, CatalogEntry, CatalogPage, CatalogSearch, CoverEntry, LookupError,
};

/// Finds every title except those listed in `unknown`; `broken` makes every
/// search fail.
#[derive(Default)]
struct FakeCatalog {
    unknown: Vec<&'static str>,
    broken: bool,
}

impl CatalogSearch for FakeCatalog {
    async fn search_catalog(&self, query: &str, _page: u32) -> Result<CatalogPage, LookupError> {
        if self.broken {
            return Err(LookupError::Api("service unavailable".to_string()));
        }
        if self.unknown.contains(&query) {
            return Ok(CatalogPage::default());
        }
        Ok(CatalogPage {
            total: 1,
            results: vec![CatalogEntry {
                id: 7,
                name: query.to_string(),
                image_url: Some(format!("https://img.example/{query}.jpg")),
                critic_score: 91,
                release_year: Some("2017".to_string()),
                description: String::new(),
                screenshots: vec!["shot.jpg".to_string()],
            }],
        })
    }

    async fn fetch_details(&self, _id: u64) -> Result<CatalogDetails, LookupError> {
        Ok(CatalogDetails {
            description: "From the catalog".to_string(),
            screenshots: None,
        })
    }

    async fn search_covers(&self, _query: &str) -> Result<Vec<CoverEntry>, LookupError> {
        Ok(vec![])
    }
}

#[derive(Default)]
struct RecordingProgress {
    rows: RefCell<Vec<(usize, usize)>>,
    completed: RefCell<Option<String>>,
}

impl ImportProgress for RecordingProgress {
    fn on_row(&self, current: usize, total: usize, _title: &str) {
        self.rows.borrow_mut().push((current, total));
    }
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, message: &str) {
        *self.completed.borrow_mut() = Some(message.to_string());
    }
}

const MIXED: &str = "\
Nombre,Plataforma,Estado,Formato,Nota
Zelda,Switch,Completado,Físico,9.5
,PC,Pendiente,Digital,
Halo,Dreamcast 2,,,
Hades,,,,\"8,5\"
Doom,PC,Pendiente,Digital,11
";

#[tokio::test]
async fn bad_rows_are_reported_and_the_rest_imported() {
    let gateway = LocalGateway::in_memory().unwrap();
    let catalog = FakeCatalog::default();
    let progress = RecordingProgress::default();

    let report = import_csv(&gateway, "u1", Some(&catalog), MIXED, &progress)
        .await
        .unwrap();

    assert_eq!(report.total_rows, 5);
    assert_eq!(report.imported, 2);
    assert_eq!(report.errors.len(), 3);
    assert!(!report.is_clean());

    assert!(matches!(report.errors[0].problem, RowProblem::EmptyTitle));
    assert_eq!(report.errors[0].line, 3);
    assert!(matches!(
        &report.errors[1].problem,
        RowProblem::UnknownPlatform(p) if p == "Dreamcast 2"
    ));
    assert_eq!(report.errors[1].title, "Halo");
    assert!(matches!(report.errors[2].problem, RowProblem::InvalidRating(_)));

    let stored = gateway.list_games("u1").await.unwrap();
    let zelda = stored.iter().find(|g| g.title == "Zelda").unwrap();
    assert_eq!(zelda.platform, Platform::Switch);
    assert_eq!(zelda.status, Status::Completed);
    assert_eq!(zelda.format, Format::Physical);
    assert_eq!(zelda.user_rating, Some(9.5));
    assert_eq!(zelda.critic_score, 91);
    assert_eq!(zelda.image_url.as_deref(), Some("https://img.example/Zelda.jpg"));
    assert_eq!(zelda.description.as_deref(), Some("From the catalog"));

    let hades = stored.iter().find(|g| g.title == "Hades").unwrap();
    assert_eq!(hades.platform, Platform::Pc);
    assert_eq!(hades.status, Status::Pending);
    assert_eq!(hades.format, Format::Digital);
    assert_eq!(hades.user_rating, Some(8.5));

    assert_eq!(progress.rows.borrow().len(), 5);
    assert_eq!(progress.rows.borrow().last(), Some(&(5, 5)));
    assert!(progress.completed.borrow().is_some());
}

#[tokio::test]
async fn lookup_failures_fall_back_to_the_placeholder() {
    let gateway = LocalGateway::in_memory().unwrap();
    let catalog = FakeCatalog {
        broken: true,
        ..Default::default()
    };
    let csv = "title,platform\nCeleste,PC\n";

    let report = import_csv(&gateway, "u1", Some(&catalog), csv, &SilentProgress)
        .await
        .unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.lookup_misses, 1);

    let stored = gateway.list_games("u1").await.unwrap();
    assert_eq!(stored[0].image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
    assert_eq!(stored[0].critic_score, 0);
}

#[tokio::test]
async fn catalog_misses_count_separately_from_errors() {
    let gateway = LocalGateway::in_memory().unwrap();
    let catalog = FakeCatalog {
        unknown: vec!["Homebrew"],
        ..Default::default()
    };
    let csv = "Title\nHomebrew\nOkami\n";

    let report = import_csv(&gateway, "u1", Some(&catalog), csv, &SilentProgress)
        .await
        .unwrap();
    assert!(report.is_clean());
    assert_eq!(report.imported, 2);
    assert_eq!(report.lookup_misses, 1);
}

#[tokio::test]
async fn import_without_lookup_uses_placeholder() {
    let gateway = LocalGateway::in_memory().unwrap();
    let report = import_csv::<_, FakeCatalog>(
        &gateway,
        "u1",
        None,
        "name,estado\nTetris,Jugando\n",
        &SilentProgress,
    )
    .await
    .unwrap();
    assert_eq!(report.imported, 1);

    let stored = gateway.list_games("u1").await.unwrap();
    assert_eq!(stored[0].status, Status::Playing);
    assert_eq!(stored[0].image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
}

#[tokio::test]
async fn missing_title_column_is_a_file_error() {
    let gateway = LocalGateway::in_memory().unwrap();
    let result = import_csv::<_, FakeCatalog>(
        &gateway,
        "u1",
        None,
        "platform,status\nPC,Pendiente\n",
        &SilentProgress,
    )
    .await;
    assert!(matches!(result, Err(ImportError::MissingTitleColumn)));
    assert!(gateway.list_games("u1").await.unwrap().is_empty());
}

#[test]
fn headers_match_aliases_case_insensitively() {
    let columns = ColumnMap::from_headers(["\u{feff}Título", "ESTADO", "Rating", "extra"]).unwrap();
    assert_eq!(columns.title, 0);
    assert_eq!(columns.status, Some(1));
    assert_eq!(columns.user_rating, Some(2));
    assert_eq!(columns.platform, None);
    assert_eq!(columns.format, None);
}

#[test]
fn ratings_follow_the_half_point_grid() {
    assert_eq!(parse_rating("7").unwrap(), 7.0);
    assert_eq!(parse_rating("7,5").unwrap(), 7.5);
    assert!(parse_rating("7.3").is_err());
    assert!(parse_rating("-1").is_err());
    assert!(parse_rating("great").is_err());
}
