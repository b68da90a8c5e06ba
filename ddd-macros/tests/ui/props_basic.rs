use chrono::{TimeZone, Utc};
use ddd_core::projection::{Projector, ToPlain};
use ddd_core::property::{PropertyBag, Props};
use ddd_macros::Props;

#[derive(Debug, Clone, PartialEq, Props)]
struct Profile {
    pub nickname: String,
    #[props(rename = "createdAt")]
    created_at: chrono::DateTime<Utc>,
    #[props(skip)]
    cache: Option<String>,
    r#type: u8,
}

#[derive(Props)]
struct Wrapper<T> {
    inner: Vec<T>,
}

#[derive(Props)]
struct Empty {}

fn main() {
    let profile = Profile {
        nickname: "neo".into(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        cache: Some("x".into()),
        r#type: 1,
    };

    // 跳过的字段不在 KEYS 中，重命名生效
    assert_eq!(Profile::KEYS, &["nickname", "createdAt", "type"]);
    assert_eq!(Profile::CREATED_AT.name(), "createdAt");

    // 跳过的字段仍可按键访问
    let mut bag = PropertyBag::new(profile);
    bag.set(Profile::CACHE, None);
    assert_eq!(bag.get(Profile::TYPE), &1);

    let plain = Projector::default().project(bag.props()).unwrap();
    assert!(plain.get("cache").is_none());
    assert!(plain["createdAt"].as_date().is_some());

    // 泛型属性结构体
    let w = Wrapper { inner: vec![1, 2] };
    let plain = w.to_plain(&mut Projector::default()).unwrap();
    assert_eq!(plain["inner"].as_array().map(<[_]>::len), Some(2));

    let empty = Projector::default().project(&Empty {}).unwrap();
    assert!(empty.as_object().unwrap().is_empty());
}
