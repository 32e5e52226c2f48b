use serde::Serialize;
use snipgen_core::{ClientId, Language, TaskFamily, TaskRegistry};
use snipgen_provider::ProviderRegistry;

#[derive(Serialize)]
struct TaskEntry {
    id: &'static str,
    family: TaskFamily,
    pipeline_tag: &'static str,
}

#[derive(Serialize)]
struct ProviderEntry {
    id: String,
    families: Vec<TaskFamily>,
    streaming: bool,
    router_only: bool,
    native_sdk: bool,
}

#[derive(Serialize)]
struct ClientEntry {
    name: ClientId,
    language: Language,
}

#[derive(Serialize)]
struct Listing {
    tasks: Vec<TaskEntry>,
    providers: Vec<ProviderEntry>,
    clients: Vec<ClientEntry>,
}

fn listing() -> Listing {
    let tasks = TaskRegistry::builtins()
        .iter()
        .map(|task| TaskEntry {
            id: task.id,
            family: task.family,
            pipeline_tag: task.pipeline_tag,
        })
        .collect();
    let providers = ProviderRegistry::global()
        .all()
        .iter()
        .map(|provider| {
            let caps = provider.capabilities();
            ProviderEntry {
                id: provider.id().to_string(),
                families: caps.families.to_vec(),
                streaming: caps.streaming,
                router_only: caps.router_only,
                native_sdk: caps.native_sdk,
            }
        })
        .collect();
    Listing {
        tasks,
        providers,
        clients: ClientId::ALL
            .iter()
            .map(|client| ClientEntry {
                name: *client,
                language: client.language(),
            })
            .collect(),
    }
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let listing = listing();
    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Tasks ({}):", listing.tasks.len());
    for task in &listing.tasks {
        println!("  {} [{}]", task.id, task.family.as_str());
    }
    println!("Providers ({}):", listing.providers.len());
    for provider in &listing.providers {
        let mut flags = Vec::new();
        if provider.streaming {
            flags.push("streaming");
        }
        if provider.router_only {
            flags.push("router-only");
        }
        if provider.native_sdk {
            flags.push("native-sdk");
        }
        println!("  {} {}", provider.id, flags.join(" "));
    }
    println!("Clients ({}):", listing.clients.len());
    for client in &listing.clients {
        println!("  {} ({})", client.name.as_str(), client.language.as_str());
    }
    Ok(())
}
