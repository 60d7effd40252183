//! User settings model.

use serde::{Deserialize, Serialize};

/// Built-in prompt used to turn a video into an app specification.
pub const DEFAULT_PROMPT: &str = r#"You are a pedagogist and product designer with deep expertise in crafting engaging learning experiences via interactive, vivid, visual-based web apps.

Examine the contents of the attached video. Then, write a detailed and carefully considered spec for an interactive web app designed to complement the video and reinforce its key idea or ideas. The recipient of the spec does not have access to the video, so the spec must be thorough and self-contained (the spec must not mention that it is based on a video). Here is an example of a spec written in response to a video about functional harmony:

"In music, chords create expectations of movement toward certain other chords and resolution towards a tonal center. This is called functional harmony.

Build me an interactive web app to help a learner understand the concept of functional harmony.

SPECIFICATIONS:
1. The app must feature an interactive keyboard.
2. The app must showcase all 7 diatonic triads that can be created in a major key (i.e., tonic, supertonic, mediant, subdominant, dominant, submediant, leading chord).
3. The app must somehow describe the function of each of the diatonic triads, and state which other chords each triad tends to lead to.
4. The app must provide a way for users to play different chords in sequence and see the results.
[etc.]"

The goal of the app that is to be built based on the spec is to enhance understanding through simple and playful design. The provided spec should not be overly complex, i.e., a junior web developer should be able to implement it in a single html file (with all styles and scripts inline). Most importantly, the spec must clearly outline the core mechanics of the app, and those mechanics must be highly effective in reinforcing the given video's key idea(s).

Provide the result as a JSON object containing a single field called "spec", whose value is the spec for the web app."#;

/// Display name, affiliation and the app-generation prompt template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub custom_prompt: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            college: String::new(),
            custom_prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl UserSettings {
    /// Replace a blank prompt with the built-in template.
    pub fn normalized(mut self) -> Self {
        if self.custom_prompt.trim().is_empty() {
            self.custom_prompt = DEFAULT_PROMPT.to_string();
        }
        self
    }

    /// Name shown on shared games.
    pub fn author_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            "Anonymous".to_string()
        } else {
            name.to_string()
        }
    }
}
