use serde::{Deserialize, Serialize};

/// One of the three editor panes. The order of [`Pane::ALL`] is the tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Pane {
    #[default]
    Html,
    Css,
    Js,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Html, Pane::Css, Pane::Js];

    /// Short upper-case name used in tabs and confirmation prompts.
    pub fn label(self) -> &'static str {
        match self {
            Pane::Html => "HTML",
            Pane::Css => "CSS",
            Pane::Js => "JS",
        }
    }

    /// Name of the syntect syntax used to highlight this pane.
    pub fn syntax_name(self) -> &'static str {
        match self {
            Pane::Html => "HTML",
            Pane::Css => "CSS",
            Pane::Js => "JavaScript",
        }
    }

    /// File name this pane is written to in an archive export.
    pub fn file_name(self) -> &'static str {
        match self {
            Pane::Html => "index.html",
            Pane::Css => "style.css",
            Pane::Js => "script.js",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Pane::Html => 0,
            Pane::Css => 1,
            Pane::Js => 2,
        }
    }
}

/// The three source texts. Each one is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourceSet {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl SourceSet {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// The welcome project shown on first start.
    pub fn sample() -> Self {
        Self::new(DEFAULT_HTML, DEFAULT_CSS, DEFAULT_JS)
    }

    pub fn get(&self, pane: Pane) -> &str {
        match pane {
            Pane::Html => &self.html,
            Pane::Css => &self.css,
            Pane::Js => &self.js,
        }
    }

    pub fn set(&mut self, pane: Pane, text: String) {
        match pane {
            Pane::Html => self.html = text,
            Pane::Css => self.css = text,
            Pane::Js => self.js = text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }
}

pub const DEFAULT_HTML: &str = r#"
<div class="container">
  <h1>Welcome to FerrisFiddle!</h1>
  <p>Edit the code on the left to see your changes here in real-time.</p>
  <button id="myButton">Click Me!</button>
</div>
"#;

pub const DEFAULT_CSS: &str = r#"
:root {
  --background: #F0F2F5;
  --text-primary: #1e293b;
  --text-secondary: #475569;
  --card-background: #FFFFFF;
  --accent-color: #3b82f6;
  --accent-hover: #2563eb;
  --shadow-color: rgba(0, 0, 0, 0.1);
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
  background-color: var(--background);
  color: var(--text-primary);
  display: flex;
  justify-content: center;
  align-items: center;
  height: 100vh;
  margin: 0;
  text-align: center;
  background-image: radial-gradient(circle at 1px 1px, #e2e8f0 1px, transparent 0);
  background-size: 20px 20px;
}

.container {
  background: var(--card-background);
  padding: 2rem 3rem;
  border-radius: 16px;
  box-shadow: 0 10px 40px var(--shadow-color);
  border: 1px solid #e5e7eb;
}

h1 {
  color: var(--text-primary);
  margin-bottom: 0.5rem;
  font-weight: 600;
}

p {
  color: var(--text-secondary);
  margin-bottom: 1.5rem;
}

#myButton {
  background-color: var(--accent-color);
  color: white;
  border: none;
  padding: 12px 24px;
  border-radius: 8px;
  font-size: 16px;
  font-weight: 500;
  cursor: pointer;
  transition: background-color 0.3s ease, transform 0.2s ease, box-shadow 0.3s ease;
  box-shadow: 0 4px 15px rgba(59, 130, 246, 0.3);
}

#myButton:hover {
  background-color: var(--accent-hover);
  transform: translateY(-2px);
  box-shadow: 0 6px 20px rgba(59, 130, 246, 0.4);
}

#myButton:active {
  transform: translateY(0);
  box-shadow: 0 4px 15px rgba(59, 130, 246, 0.3);
}
"#;

pub const DEFAULT_JS: &str = r#"
const button = document.getElementById('myButton');

const colors = ['#ef4444', '#f59e0b', '#10b981', '#3b82f6', '#8b5cf6'];
let currentIndex = 0;

button.addEventListener('click', () => {
  // Change button color
  currentIndex = (currentIndex + 1) % colors.length;
  button.style.backgroundColor = colors[currentIndex];
  button.style.boxShadow = `0 4px 15px ${colors[currentIndex]}4D`;

  // console.log output shows up in the browser's dev tools
  console.log('Button clicked! New color:', colors[currentIndex]);
});
"#;
