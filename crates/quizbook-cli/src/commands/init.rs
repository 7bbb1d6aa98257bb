//! The `quizbook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizbook.toml
    if std::path::Path::new("quizbook.toml").exists() {
        println!("quizbook.toml already exists, skipping.");
    } else {
        std::fs::write("quizbook.toml", SAMPLE_CONFIG)?;
        println!("Created quizbook.toml");
    }

    // Create example content document
    if std::path::Path::new("content.json").exists() {
        println!("content.json already exists, skipping.");
    } else {
        std::fs::write("content.json", EXAMPLE_CONTENT)?;
        println!("Created content.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizbook validate");
    println!("  2. Run: quizbook identity --name \"Your Name\" --id YOUR-ID");
    println!("  3. Run: quizbook show");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbook configuration

content = "content.json"
data_dir = ".quizbook"

# Require every question to be checked before `finish` shows the score.
require_all_checked = false
"#;

const EXAMPLE_CONTENT: &str = r#"{
  "chapters": [
    {
      "title": "Greetings",
      "content": {
        "passage": "Hello is the most common English greeting. People also say hi in informal settings.",
        "explanation": "Use hello with strangers and hi with friends."
      },
      "questions": [
        {
          "type": "multiple-choice",
          "question": "Which word is a greeting?",
          "options": ["Hello", "Table", "Run"],
          "correct": 0,
          "feedback": "Hello is how English speakers greet each other."
        },
        {
          "type": "fill-in-blank",
          "question": "An informal way to say hello is ____.",
          "correct": ["hi", "hey"]
        },
        {
          "type": "drag-drop",
          "question": "Order the words to make a sentence.",
          "items": ["Nice", "to", "meet", "you"],
          "correct": ["Nice", "to", "meet", "you"]
        }
      ]
    },
    {
      "title": "Reading Practice",
      "content": {
        "passage": "Sara walks to school every morning. She likes the quiet streets before the city wakes up."
      },
      "questions": [
        {
          "type": "reading-passage",
          "question": "How does Sara get to school?",
          "options": ["By bus", "She walks", "By bicycle"],
          "correct": 1
        }
      ]
    }
  ]
}
"#;
