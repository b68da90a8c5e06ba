//! 用户资料建模示例
//!
//! 展示属性结构体、实体/值对象/聚合包装、投影与适配器的组合使用。
//!
//! 运行示例：
//! ```bash
//! RUST_LOG=trace cargo run -p ddd-core --example user_profile
//! ```

use chrono::{DateTime, Utc};
use ddd_core::prelude::*;
use ddd_core::{Props, aggregate, constants, entity, value_object};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Props)]
struct EmailProps {
    value: String,
}

#[value_object]
struct Email(ValueObject<EmailProps>);

#[derive(Debug, Clone, PartialEq, Props)]
struct ProfileProps {
    nickname: String,
    email: Email,
    #[props(rename = "joinedAt")]
    joined_at: DateTime<Utc>,
    tags: BTreeSet<String>,
}

#[entity]
struct Profile(Entity<ProfileProps>);

impl Profile {
    fn rename(&mut self, nickname: &str) -> DomainResult<()> {
        self.0.set(ProfileProps::NICKNAME, nickname.to_string())?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Props)]
struct AccountProps {
    owner: Profile,
    status: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
enum AccountEvent {
    Opened { owner: Identifier },
    Renamed { nickname: String },
}

#[aggregate]
struct Account(Aggregate<AccountProps, AccountEvent>);

impl Account {
    fn open(owner: Profile) -> Self {
        let owner_id = owner.id().clone();
        let mut account = Self(Aggregate::new(AccountProps {
            owner,
            status: "active",
        }));
        account.0.apply(AccountEvent::Opened { owner: owner_id });
        account
    }

    fn rename_owner(&mut self, nickname: &str) -> DomainResult<()> {
        let mut owner = self.get(AccountProps::OWNER)?.clone();
        owner.rename(nickname)?;
        self.0.set(AccountProps::OWNER, owner)?;
        self.0.apply(AccountEvent::Renamed {
            nickname: nickname.to_string(),
        });
        Ok(())
    }
}

struct ProfileCard;

impl Adapter<Profile, String> for ProfileCard {
    fn adapt_one(&self, profile: &Profile) -> String {
        format!("{} <{}>", profile.props().nickname, profile.props().email.props().value)
    }
}

fn main() -> DomainResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let statuses = constants! {
        ACTIVE => "active",
        CLOSED => "closed",
    }?;

    let profile = Profile::from_inner(Entity::with_id(
        ProfileProps {
            nickname: "neo".into(),
            email: Email::from_inner(ValueObject::new(EmailProps {
                value: "neo@example.com".into(),
            })),
            joined_at: Utc::now(),
            tags: BTreeSet::from(["admin".to_string()]),
        },
        "p-1",
    ));

    println!("card: {}", profile.to_object_with(&ProfileCard));

    let mut account = Account::open(profile);
    account.rename_owner("thomas")?;

    println!("status known: {}", statuses.values().contains(&account.props().status));
    println!("account: {}", account.to_object()?.to_json_string()?);
    println!("events: {:?}", account.uncommitted_events());

    Ok(())
}
