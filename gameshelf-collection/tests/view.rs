use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use gameshelf_catalog::{Format, GameId, GameRecord, Platform, Status};
use gameshelf_collection::*;

fn game(id: GameId, title: &str) -> GameRecord {
    GameRecord {
        id,
        user_id: "u1".to_string(),
        title: title.to_string(),
        platform: Platform::Pc,
        format: Format::Digital,
        status: Status::Pending,
        image_url: None,
        critic_score: 0,
        user_rating: None,
        started_at: None,
        finished_at: None,
        notes: None,
        description: None,
        screenshots: vec![],
        play_order: None,
        is_hidden_in_queue: false,
        parent_id: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id),
    }
}

fn ids(records: &[&GameRecord]) -> Vec<GameId> {
    records.iter().map(|g| g.id).collect()
}

fn sample() -> Vec<GameRecord> {
    let mut zelda = game(1, "Zelda: Breath of the Wild");
    zelda.platform = Platform::Switch;
    zelda.format = Format::Physical;
    zelda.status = Status::Completed;
    zelda.user_rating = Some(9.5);

    let mut mario = game(2, "Super Mario Odyssey");
    mario.platform = Platform::Switch;
    mario.status = Status::Playing;
    mario.user_rating = Some(8.0);

    let mut halo = game(3, "Halo Infinite");
    halo.platform = Platform::XboxSeries;

    let mut hades = game(4, "Hades");
    hades.platform = Platform::Pc;
    hades.status = Status::Completed;
    hades.user_rating = Some(9.5);

    vec![zelda, mario, halo, hades]
}

#[test]
fn filters_are_a_conjunction() {
    let records = sample();
    let query = CollectionQuery {
        statuses: [Status::Completed].into(),
        platforms: [Platform::Switch].into(),
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&records, &query)), vec![1]);
}

#[test]
fn values_within_a_set_are_a_disjunction() {
    let records = sample();
    let query = CollectionQuery {
        statuses: [Status::Completed, Status::Playing].into(),
        sort: SortKey::CreatedAsc,
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&records, &query)), vec![1, 2, 4]);
}

#[test]
fn empty_query_matches_everything() {
    let records = sample();
    let query = CollectionQuery::default();
    assert!(!query.is_filtering());
    assert_eq!(filter_and_sort(&records, &query).len(), records.len());
}

#[test]
fn every_filtered_record_matches_each_criterion() {
    let records = sample();
    let query = CollectionQuery {
        text: "o".to_string(),
        platforms: [Platform::Switch, Platform::XboxSeries].into(),
        format: FormatFilter::Only(Format::Digital),
        ..Default::default()
    };
    let result = filter_and_sort(&records, &query);
    let expected: Vec<GameId> = records
        .iter()
        .filter(|g| {
            g.title.to_lowercase().contains('o')
                && matches!(g.platform, Platform::Switch | Platform::XboxSeries)
                && g.format == Format::Digital
        })
        .map(|g| g.id)
        .collect::<Vec<_>>();
    let mut got = ids(&result);
    got.sort();
    let mut expected = expected;
    expected.sort();
    assert_eq!(got, expected);
    assert_eq!(got, vec![2, 3]);
}

#[test]
fn text_filter_ignores_case() {
    let records = sample();
    let query = CollectionQuery {
        text: "HADES".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&records, &query)), vec![4]);
}

#[test]
fn text_filter_keeps_surrounding_space() {
    let records = sample();
    let query = CollectionQuery {
        text: " hades".to_string(),
        ..Default::default()
    };
    assert!(query.is_filtering());
    assert!(filter_and_sort(&records, &query).is_empty());

    let inner = CollectionQuery {
        text: "mario odyssey".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&records, &inner)), vec![2]);
}

#[test]
fn whitespace_text_is_not_filtering() {
    let query = CollectionQuery {
        text: "   ".to_string(),
        ..Default::default()
    };
    assert!(!query.is_filtering());
}

#[test]
fn rating_sort_treats_unrated_as_zero_and_is_stable() {
    let mut records = sample();
    records[2].user_rating = Some(0.0);
    let query = CollectionQuery {
        sort: SortKey::RatingDesc,
        ..Default::default()
    };
    let first = ids(&filter_and_sort(&records, &query));
    let second = ids(&filter_and_sort(&records, &query));
    assert_eq!(first, second);
    // Equal ratings keep record order.
    assert_eq!(first, vec![1, 4, 2, 3]);
}

#[test]
fn created_sorts() {
    let records = sample();
    let desc = CollectionQuery::default();
    assert_eq!(ids(&filter_and_sort(&records, &desc)), vec![4, 3, 2, 1]);
    let asc = CollectionQuery {
        sort: SortKey::CreatedAsc,
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&records, &asc)), vec![1, 2, 3, 4]);
}

#[test]
fn title_sort_folds_case_and_accents() {
    let records = vec![
        game(1, "zelda"),
        game(2, "Ábzû"),
        game(3, "Banjo"),
        game(4, "abzu"),
    ];
    let query = CollectionQuery {
        sort: SortKey::TitleAsc,
        ..Default::default()
    };
    let sorted = ids(&filter_and_sort(&records, &query));
    assert_eq!(sorted[2..], [3, 1]);
    assert!(sorted[..2].contains(&2) && sorted[..2].contains(&4));

    let desc = CollectionQuery {
        sort: SortKey::TitleDesc,
        ..Default::default()
    };
    assert_eq!(ids(&filter_and_sort(&records, &desc))[0], 1);
}

#[test]
fn compare_titles_is_not_byte_order() {
    use std::cmp::Ordering;
    assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
    assert_eq!(compare_titles("Élite", "Fable"), Ordering::Less);
    assert_ne!(compare_titles("Abc", "abc"), Ordering::Equal);
}

#[test]
fn compare_titles_folds_any_latin_diacritic() {
    use std::cmp::Ordering;
    assert_eq!(compare_titles("Ōkami", "Portal"), Ordering::Less);
    assert_eq!(compare_titles("Šárka", "Tetris"), Ordering::Less);
    assert_eq!(compare_titles("Łódź Racer", "Mario"), Ordering::Less);
    assert_eq!(compare_titles("Ćwierć", "Doom"), Ordering::Less);
    assert_eq!(compare_titles("Ōkami", "Okami HD"), Ordering::Less);
}

#[test]
fn compare_titles_tiebreaks() {
    use std::cmp::Ordering;
    assert_eq!(compare_titles("a", "A"), Ordering::Less);
    assert_eq!(compare_titles("Zelda", "zelda"), Ordering::Greater);
    assert_eq!(compare_titles("Okami", "Ōkami"), Ordering::Less);
    assert_eq!(compare_titles("Ōkami", "Ōkami"), Ordering::Equal);
}

#[test]
fn pages_cover_the_universe_exactly_once() {
    let records: Vec<GameRecord> = (1..=45).map(|i| game(i, &format!("Game {i}"))).collect();
    let query = CollectionQuery::default();
    let first = paginate(&records, &query, 1, 20);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.universe_len, 45);

    let mut seen = HashSet::new();
    for page in 1..=first.total_pages {
        for item in paginate(&records, &query, page, 20).items {
            assert!(seen.insert(item.game.id), "duplicate {}", item.game.id);
        }
    }
    assert_eq!(seen.len(), 45);

    assert_eq!(paginate(&records, &query, 3, 20).items.len(), 5);
    assert!(paginate(&records, &query, 4, 20).items.is_empty());
}

#[test]
fn empty_records_yield_an_empty_page() {
    let page = paginate(&[], &CollectionQuery::default(), 1, DEFAULT_PAGE_SIZE);
    assert_eq!(page.total_pages, 0);
    assert!(page.items.is_empty());
    assert_eq!(page.universe_len, 0);
}

#[test]
fn grid_universe_excludes_dlcs_and_nests_them() {
    let base = game(10, "Base Game");
    let mut dlc = game(11, "Base Game: Expansion");
    dlc.parent_id = Some(10);
    let records = vec![dlc, base];

    let page = paginate(&records, &CollectionQuery::default(), 1, 20);
    assert!(!page.active_filtering);
    assert_eq!(page.universe_len, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].game.id, 10);
    assert_eq!(ids(&page.items[0].dlcs), vec![11]);
    assert!(!page.items[0].standalone_dlc);
}

#[test]
fn filtered_universe_includes_dlcs_as_standalone() {
    let base = game(10, "Base Game");
    let mut dlc = game(11, "Base Game: Expansion");
    dlc.parent_id = Some(10);
    let records = vec![dlc, base];

    let query = CollectionQuery {
        text: "base".to_string(),
        ..Default::default()
    };
    let page = paginate(&records, &query, 1, 20);
    assert!(page.active_filtering);
    assert_eq!(page.universe_len, 2);
    let dlc_item = page.items.iter().find(|i| i.game.id == 11).unwrap();
    assert!(dlc_item.standalone_dlc);
    assert!(page.items.iter().all(|i| i.dlcs.is_empty()));
}

#[test]
fn scenario_text_filter_finds_zelda() {
    let mut zelda = game(1, "Zelda");
    zelda.play_order = Some(0);
    let mut mario = game(2, "Mario");
    mario.play_order = Some(1);
    let records = vec![zelda, mario];

    let mut view = CollectionView::new();
    view.set_text("zel");
    assert_eq!(ids(&view.filtered(&records)), vec![1]);
    let page = view.current_page(&records);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].game.title, "Zelda");
}

#[test]
fn view_setters_reset_page_and_navigation_clamps() {
    let records: Vec<GameRecord> = (1..=45).map(|i| game(i, &format!("Game {i}"))).collect();
    let mut view = CollectionView::new();

    view.next_page(&records);
    view.next_page(&records);
    view.next_page(&records);
    assert_eq!(view.page(), 3);

    view.prev_page(&records);
    assert_eq!(view.page(), 2);

    view.set_sort(SortKey::TitleAsc);
    assert_eq!(view.page(), 1);

    view.prev_page(&records);
    assert_eq!(view.page(), 1);

    view.set_page(&records, 99);
    assert_eq!(view.page(), 3);
    view.toggle_status(Status::Completed);
    assert_eq!(view.page(), 1);
    view.set_page(&records, 2);
    assert_eq!(view.page(), 1, "no completed games, so only one page");

    view.toggle_status(Status::Completed);
    assert!(view.query().statuses.is_empty());
}

#[test]
fn clear_filters_keeps_sort() {
    let mut view = CollectionView::new();
    view.set_sort(SortKey::RatingDesc);
    view.set_text("mario");
    view.toggle_platform(Platform::Switch);
    view.set_format(FormatFilter::Only(Format::Physical));
    view.clear_filters();
    assert!(!view.query().is_filtering());
    assert_eq!(view.query().sort, SortKey::RatingDesc);
}

#[test]
fn parent_picker_lists_base_games_only() {
    let base = game(10, "Elden Ring");
    let mut dlc = game(11, "Elden Ring: Shadow of the Erdtree");
    dlc.parent_id = Some(10);
    let other = game(12, "Dark Souls");
    let records = vec![base, dlc, other];

    assert_eq!(ids(&base_games_matching(&records, "elden")), vec![10]);
    assert_eq!(base_games_matching(&records, "").len(), 2);
}

#[test]
fn sort_and_format_keys_parse() {
    assert_eq!("rating_desc".parse::<SortKey>().unwrap(), SortKey::RatingDesc);
    assert_eq!("title-asc".parse::<SortKey>().unwrap(), SortKey::TitleAsc);
    assert!("newest".parse::<SortKey>().is_err());
    assert_eq!("Todos".parse::<FormatFilter>().unwrap(), FormatFilter::All);
    assert_eq!(
        "físico".parse::<FormatFilter>().unwrap(),
        FormatFilter::Only(Format::Physical)
    );
}
