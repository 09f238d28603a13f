use chrono::{NaiveDate, NaiveDateTime};
use leaven_core::history::HISTORY_CAPACITY;
use leaven_core::{
    CalibrationTable, EstimateRequest, FavoriteSettings, Favorites, History, HistoryEntry,
    LeavenError, RiseTarget, Temperature,
};
use rstest::{fixture, rstest};

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn entry(hour: u32, temperature_f: f64) -> HistoryEntry {
    let req = EstimateRequest::new(temperature_f, 15.0, RiseTarget::Percent100);
    let res = CalibrationTable::standard().estimate(&req);
    HistoryEntry::new(at(hour), &req, &res)
}

#[fixture]
fn settings() -> FavoriteSettings {
    FavoriteSettings {
        temperature: Temperature::celsius(22.0),
        starter_percent: 15.0,
        rise_target: RiseTarget::Percent75,
        start_time: Some(at(8)),
    }
}

#[test]
fn entry_captures_both_units_and_split() {
    let e = entry(9, 70.0);
    assert_eq!(e.temperature_c, 21);
    assert_eq!(e.estimated_hours, 7.0);
    assert_eq!(e.parts.hours, 7);
    assert_eq!(e.parts.minutes, 0);
    assert_eq!(e.request().temperature_f, 70.0);
}

#[test]
fn history_is_newest_first_and_capped() {
    let mut h = History::new();
    for hour in 0..(HISTORY_CAPACITY as u32 + 3) {
        h.record(entry(hour, 70.0));
    }
    assert_eq!(h.len(), HISTORY_CAPACITY);
    assert_eq!(h.latest().unwrap().recorded_at, at(12));
    let oldest = h.iter().last().unwrap();
    assert_eq!(oldest.recorded_at, at(3));

    h.clear();
    assert!(h.is_empty());
}

#[test]
fn history_serializes_as_a_plain_list() {
    let mut h = History::new();
    h.record(entry(9, 72.0));
    let json = serde_json::to_value(&h).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["rise_target"], 100);
    let back: History = serde_json::from_value(json).unwrap();
    assert_eq!(back, h);
}

#[rstest]
fn favorites_add_get_remove(settings: FavoriteSettings) {
    let mut f = Favorites::new();
    let warm = f.add("  Warm kitchen ", settings.clone()).unwrap();
    let cool = f.add("Cool night", settings.clone()).unwrap();
    assert_ne!(warm, cool);
    assert_eq!(f.get(warm).unwrap().name, "Warm kitchen");

    let removed = f.remove(warm).unwrap();
    assert_eq!(removed.settings, settings);
    assert_eq!(f.len(), 1);
    assert_eq!(f.remove(warm), Err(LeavenError::UnknownFavorite(warm)));

    // Ids are not reused after removal.
    let again = f.add("Warm kitchen", settings).unwrap();
    assert!(again > cool);
}

#[rstest]
#[case("")]
#[case("   ")]
fn favorites_reject_blank_names(settings: FavoriteSettings, #[case] name: &str) {
    let mut f = Favorites::new();
    assert_eq!(f.add(name, settings), Err(LeavenError::EmptyFavoriteName));
    assert!(f.is_empty());
}

#[rstest]
fn favorite_settings_normalise_to_fahrenheit(settings: FavoriteSettings) {
    let req = settings.request();
    assert_eq!(req.temperature_f, 72.0);
    assert_eq!(req.rise_target, RiseTarget::Percent75);
}

#[rstest]
fn favorites_survive_a_json_round_trip(settings: FavoriteSettings) {
    let mut f = Favorites::new();
    let a = f.add("a", settings.clone()).unwrap();
    f.add("b", settings.clone()).unwrap();
    f.remove(a).unwrap();

    let json = serde_json::to_string(&f).unwrap();
    let mut back: Favorites = serde_json::from_str(&json).unwrap();
    assert_eq!(back, f);
    let c = back.add("c", settings).unwrap();
    assert!(c > a);
}

#[rstest]
fn stale_counter_is_moved_past_stored_ids(settings: FavoriteSettings) {
    let mut f = Favorites::new();
    f.add("a", settings.clone()).unwrap();
    f.add("b", settings.clone()).unwrap();

    let mut json = serde_json::to_value(&f).unwrap();
    json["next_id"] = serde_json::json!(0);
    let mut loaded: Favorites = serde_json::from_value(json).unwrap();

    let id = loaded.add("c", settings).unwrap();
    assert_eq!(id, 2);
    assert_eq!(loaded.iter().filter(|fav| fav.id == id).count(), 1);
}

#[rstest]
fn duplicate_stored_ids_are_rejected(settings: FavoriteSettings) {
    let mut f = Favorites::new();
    f.add("a", settings.clone()).unwrap();
    f.add("b", settings).unwrap();

    let mut json = serde_json::to_value(&f).unwrap();
    json["items"][1]["id"] = serde_json::json!(0);
    let err = serde_json::from_value::<Favorites>(json).unwrap_err();
    assert!(err.to_string().contains("duplicate id 0"), "{err}");
}

#[rstest]
fn exhausted_counter_is_an_error_not_a_panic(settings: FavoriteSettings) {
    let json = serde_json::json!({ "next_id": u64::MAX, "items": [] });
    let mut f: Favorites = serde_json::from_value(json).unwrap();
    assert_eq!(f.add("a", settings), Err(LeavenError::FavoriteIdsExhausted));
    assert!(f.is_empty());
}

#[rstest]
fn stored_max_id_cannot_be_followed(settings: FavoriteSettings) {
    let mut f = Favorites::new();
    f.add("a", settings).unwrap();
    let mut json = serde_json::to_value(&f).unwrap();
    json["items"][0]["id"] = serde_json::json!(u64::MAX);
    let err = serde_json::from_value::<Favorites>(json).unwrap_err();
    assert!(err.to_string().contains("exhausted"), "{err}");
}
