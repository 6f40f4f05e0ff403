use std::env;
use std::net::SocketAddr;

use cardinal_api::{serve, Clock, RealmApi};
use contracts::{Attribute, GameConfig, SkillFlag};

fn print_usage() {
    println!("cardinal-cli <command>");
    println!("commands:");
    println!("  status");
    println!("  serve [addr]");
    println!("    default addr: 127.0.0.1:8080");
    println!("  demo [seed_key_hash]");
    println!("    runs a scripted realm with a fixed clock and prints the outcomes");
}

fn parse_socket_addr(value: Option<&String>) -> Result<SocketAddr, String> {
    let raw = value.map(String::as_str).unwrap_or("127.0.0.1:8080");
    raw.parse::<SocketAddr>()
        .map_err(|_| format!("invalid addr: {raw}"))
}

fn run_demo(args: &[String]) -> Result<(), String> {
    let mut config = GameConfig::default();
    if let Some(key_hash) = args.get(2) {
        config.key_hash = key_hash.clone();
    }
    let game_master = config.game_master.clone();
    let player = "account:kirito".to_string();

    let mut realm = RealmApi::with_clock(config, Clock::Fixed(1_700_000_000));
    println!("realm {} created", realm.realm_id());

    let avatar = realm
        .mint_free_avatar(&player)
        .map_err(|err| format!("free mint failed: {err}"))?;
    println!(
        "minted avatar {} for {} gender={:?} rarity={:?}",
        avatar.avatar_id, avatar.owner, avatar.gender, avatar.rarity
    );

    let skill = realm
        .create_new_skill(&game_master, "Blade Dance", SkillFlag::Active)
        .map_err(|err| format!("skill creation failed: {err}"))?;
    realm
        .set_skill_requirement(&game_master, skill.skill_id, Attribute::Dexterity, 10)
        .map_err(|err| format!("requirement update failed: {err}"))?;
    println!("skill {} '{}' requires DEX 10", skill.skill_id, skill.name);

    realm
        .add_attribute_points(&game_master, avatar.avatar_id, 12)
        .map_err(|err| format!("granting points failed: {err}"))?;
    let dex = realm
        .set_attributes(&player, avatar.avatar_id, Attribute::Dexterity, 10)
        .map_err(|err| format!("allocating points failed: {err}"))?;
    let learned = realm
        .learn_skill(&player, avatar.avatar_id, skill.skill_id)
        .map_err(|err| format!("learning failed: {err}"))?;
    println!("avatar DEX={dex} learned={learned}");

    realm
        .set_max_reward_cor(&game_master, 1, 1_000_000)
        .map_err(|err| format!("cor cap update failed: {err}"))?;
    realm
        .set_max_reward_exp(&game_master, 1, 500)
        .map_err(|err| format!("exp cap update failed: {err}"))?;

    let outcome = realm
        .do_adventure(&player, avatar.avatar_id, 1, 4)
        .map_err(|err| format!("adventure failed: {err}"))?;
    println!(
        "adventure {} events={} total_cor={} total_exp={} busy_until={}",
        outcome.adventure_id,
        outcome.event_ids.len(),
        outcome.total_cor,
        outcome.total_exp,
        outcome.busy_until
    );
    for event_id in &outcome.event_ids {
        let event = realm
            .get_event(*event_id)
            .map_err(|err| format!("event lookup failed: {err}"))?;
        println!(
            "  event {} {:?} cor={} exp={}",
            event.event_id, event.event_type, event.reward_cor, event.reward_exp
        );
    }

    println!("{}", realm.status());
    Ok(())
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("status") => {
            let realm = RealmApi::from_config(GameConfig::default());
            println!("{}", realm.status());
        }
        Some("serve") => match parse_socket_addr(args.get(2)) {
            Ok(addr) => {
                println!("serving api on http://{addr}");
                if let Err(err) = serve(addr).await {
                    eprintln!("server error: {err}");
                    std::process::exit(1);
                }
            }
            Err(err) => {
                eprintln!("error: {}", err);
                print_usage();
                std::process::exit(2);
            }
        },
        Some("demo") => {
            if let Err(err) = run_demo(&args) {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        }
        _ => {
            print_usage();
        }
    }
}
