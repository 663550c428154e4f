use anyhow::Result;
use clap::Parser;
use rolodex::{Contact, DirectoryService, DirectorySettings};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(about = "Dual-indexed in-memory contact directory", long_about = None)]
struct Args {
    /// Maximum number of contacts (unbounded if omitted)
    #[arg(long, env = "ROLODEX_CAPACITY")]
    capacity: Option<usize>,

    /// JSON file of contacts to preload
    #[arg(long, env = "ROLODEX_SEED")]
    seed: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let settings = DirectorySettings {
        capacity: args.capacity,
        ..DirectorySettings::default()
    };
    let mut directory = DirectoryService::with_settings(settings);

    if let Some(path) = &args.seed {
        let contacts: Vec<Contact> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let count = contacts.len();
        for contact in contacts {
            directory.insert(&contact.name, &contact.phone)?;
        }
        info!(count, "seeded directory");
    }

    println!("rolodex v{} - type 'help' for commands", rolodex::VERSION);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["add", name, phone] => match directory.insert(name, phone) {
                Ok(()) => println!("Contact '{}' inserted successfully.", name),
                Err(e) => println!("Insert failed: {}", e),
            },
            ["find", name] => match directory.lookup(name) {
                Some(contact) => println!("Contact found: {}", contact),
                None => println!("Contact '{}' not found.", name),
            },
            ["prefix", prefix] => {
                let contacts = directory.search_by_prefix(prefix);
                if contacts.is_empty() {
                    println!("No contacts found with prefix '{}'.", prefix);
                } else {
                    println!("Contacts found for prefix '{}':", prefix);
                    for contact in contacts {
                        println!("- {}", contact);
                    }
                }
            }
            ["update", name, phone, new_name, new_phone] => {
                match directory.update(name, phone, new_name, new_phone) {
                    Ok(true) => println!("Contact '{}' updated to '{}'.", name, new_name),
                    Ok(false) => println!(
                        "Contact '{}' with phone '{}' not found; nothing updated.",
                        name, phone
                    ),
                    Err(e) if e.is_consistency_fault() => {
                        return Err(anyhow::anyhow!("unrecoverable consistency error: {}", e))
                    }
                    Err(e) => println!("Update failed: {}", e),
                }
            }
            ["del", name] => match directory.delete(name) {
                Ok(true) => println!("Contact '{}' deleted successfully.", name),
                Ok(false) => println!("Contact '{}' not found.", name),
                Err(e) if e.is_consistency_fault() => {
                    return Err(anyhow::anyhow!("unrecoverable consistency error: {}", e))
                }
                Err(e) => println!("Delete failed: {}", e),
            },
            ["list"] => {
                let contacts = directory.list_sorted();
                if contacts.is_empty() {
                    println!("No contacts to display.");
                } else {
                    println!("Contacts:");
                    for contact in contacts {
                        println!("{}", contact);
                    }
                }
            }
            ["report"] => print!("{}", directory.markdown_report()),
            ["report", path] => {
                std::fs::write(path, directory.markdown_report())?;
                println!("Report written to {}.", path);
            }
            ["export", path] => {
                directory.export_json(std::fs::File::create(path)?)?;
                println!("Exported {} contacts to {}.", directory.len(), path);
            }
            _ => println!("Unknown command; type 'help' for usage."),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  add NAME PHONE                       insert or overwrite a contact");
    println!("  find NAME                            exact lookup");
    println!("  prefix PREFIX                        list contacts whose name starts with PREFIX");
    println!("  update NAME PHONE NEW_NAME NEW_PHONE guarded update / rename");
    println!("  del NAME                             delete a contact");
    println!("  list                                 all contacts in name order");
    println!("  report [FILE]                        markdown rendering of the trie");
    println!("  export FILE                          write all contacts as JSON");
    println!("  quit                                 exit");
}
