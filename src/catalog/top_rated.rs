//! Curated games that ship with the app.

use crate::models::{
    CuratedGame, GamePayload, RpgData, RpgInteractionOption, RpgScene, WebAppData,
};

pub const MONSTERS_BOUNTY: &str = "Monster's Bounty";
pub const GRAVITY_SLING: &str = "Gravity Sling";

fn option(text: &str, is_correct: bool, feedback: &str) -> RpgInteractionOption {
    RpgInteractionOption {
        text: text.to_string(),
        is_correct,
        feedback: feedback.to_string(),
    }
}

fn scene(
    id: &str,
    title: &str,
    narrative: &str,
    challenge: &str,
    options: Vec<RpgInteractionOption>,
    next: Option<&str>,
) -> RpgScene {
    RpgScene {
        id: id.to_string(),
        title: title.to_string(),
        narrative: narrative.to_string(),
        challenge: challenge.to_string(),
        options,
        next_scene_id: next.map(str::to_string),
    }
}

fn monsters_bounty() -> CuratedGame {
    let scenes = vec![
        scene(
            "tavern",
            "The Tavern Board",
            "A bounty board lists monster sightings from the last ten nights: 2, 4, 4, 5, 7, 9, 3, 4, 6, 6.",
            "The captain wants the typical number of sightings per night. Which summary do you report?",
            vec![
                option("The mean: 5", true, "Right. The sum is 50 over 10 nights, so the mean is 5."),
                option("The largest value: 9", false, "The maximum describes the worst night, not a typical one."),
                option("The first value: 2", false, "A single observation says nothing about the whole sample."),
            ],
            Some("forest"),
        ),
        scene(
            "forest",
            "Tracks in the Forest",
            "You sample 25 footprints and find an average stride of 80cm with a standard deviation of 10cm.",
            "What is the standard error of the mean stride?",
            vec![
                option("10cm", false, "That is the spread of individual strides, not of the sample mean."),
                option("2cm", true, "Correct: 10 / sqrt(25) = 2cm."),
                option("0.4cm", false, "You divided by n instead of the square root of n."),
            ],
            Some("lair"),
        ),
        scene(
            "lair",
            "The Lair",
            "The guild claims the beast's stride is 75cm. Your 95% interval for the mean is 76cm to 84cm.",
            "What do you conclude about the guild's claim?",
            vec![
                option("Reject it: 75cm lies outside the interval", true, "Exactly. The claimed value is not plausible at the 5% level."),
                option("Accept it: the interval is wide", false, "Width alone does not decide; check whether 75cm is inside."),
            ],
            None,
        ),
    ];

    CuratedGame {
        id: "top-monsters-bounty".to_string(),
        name: MONSTERS_BOUNTY.to_string(),
        subject: "Statistics".to_string(),
        image_url: "https://images.unsplash.com/photo-1518709268805-4e9042af9f23?q=80&w=400&auto=format&fit=crop".to_string(),
        payload: GamePayload::Rpg(RpgData {
            title: Some(MONSTERS_BOUNTY.to_string()),
            scenes,
        }),
    }
}

const GRAVITY_SLING_SPEC: &str = "Build an interactive web app where the learner launches a probe past a planet. \
The app must let the learner set launch speed and angle, show the probe's trajectory, and display the probe's \
momentum and kinetic energy before and after the flyby so the learner can see how a gravity assist transfers energy.";

const GRAVITY_SLING_CODE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Gravity Sling</title>
<style>
body { font-family: sans-serif; background: #0b1020; color: #e6e9f5; margin: 0; }
canvas { display: block; margin: 0 auto; background: #000; }
.controls { text-align: center; padding: 8px; }
</style>
</head>
<body>
<div class="controls">
  Speed <input id="speed" type="range" min="1" max="8" value="4">
  Angle <input id="angle" type="range" min="0" max="90" value="20">
  <button id="launch">Launch</button>
  <span id="stats"></span>
</div>
<canvas id="space" width="640" height="400"></canvas>
<script>
const ctx = document.getElementById('space').getContext('2d');
const planet = { x: 400, y: 200, m: 4000 };
let probe = null;
function launch() {
  const v = +document.getElementById('speed').value;
  const a = +document.getElementById('angle').value * Math.PI / 180;
  probe = { x: 20, y: 380, vx: v * Math.cos(a), vy: -v * Math.sin(a), m: 1 };
}
function step() {
  ctx.fillStyle = 'rgba(0,0,0,0.2)';
  ctx.fillRect(0, 0, 640, 400);
  ctx.fillStyle = '#4a8cff';
  ctx.beginPath(); ctx.arc(planet.x, planet.y, 20, 0, 2 * Math.PI); ctx.fill();
  if (probe) {
    const dx = planet.x - probe.x, dy = planet.y - probe.y;
    const d2 = Math.max(dx * dx + dy * dy, 400);
    const f = planet.m / d2 / Math.sqrt(d2);
    probe.vx += f * dx; probe.vy += f * dy;
    probe.x += probe.vx; probe.y += probe.vy;
    const speed = Math.hypot(probe.vx, probe.vy);
    document.getElementById('stats').textContent =
      'p = ' + (probe.m * speed).toFixed(2) + '  KE = ' + (0.5 * probe.m * speed * speed).toFixed(2);
    ctx.fillStyle = '#ffd166';
    ctx.fillRect(probe.x - 2, probe.y - 2, 4, 4);
  }
  requestAnimationFrame(step);
}
document.getElementById('launch').onclick = launch;
step();
</script>
</body>
</html>"#;

fn gravity_sling() -> CuratedGame {
    CuratedGame {
        id: "top-gravity-sling".to_string(),
        name: GRAVITY_SLING.to_string(),
        subject: "Physics".to_string(),
        image_url: "https://images.unsplash.com/photo-1446776811953-b23d57bd21aa?q=80&w=400&auto=format&fit=crop".to_string(),
        payload: GamePayload::WebApp(WebAppData {
            spec: GRAVITY_SLING_SPEC.to_string(),
            code: GRAVITY_SLING_CODE.to_string(),
        }),
    }
}

fn cell_siege() -> CuratedGame {
    let scenes = vec![
        scene(
            "membrane",
            "At the Membrane",
            "A virus drifts toward a human cell, looking for a way inside.",
            "What must the virus bind to before it can enter?",
            vec![
                option("A receptor protein on the cell surface", true, "Yes. Binding a specific receptor is the first step of entry."),
                option("The nucleus", false, "The nucleus is deep inside; the virus has not entered yet."),
            ],
            Some("cytoplasm"),
        ),
        scene(
            "cytoplasm",
            "Inside the Cell",
            "Now inside, the virus releases its RNA into the cytoplasm.",
            "Which organelle will translate the viral RNA into proteins?",
            vec![
                option("Mitochondria", false, "Mitochondria produce ATP; they do not translate RNA."),
                option("Ribosomes", true, "Correct. The host's ribosomes build the viral proteins."),
            ],
            None,
        ),
    ];

    CuratedGame {
        id: "top-cell-siege".to_string(),
        name: "Cell Siege".to_string(),
        subject: "Biology".to_string(),
        image_url: "https://images.unsplash.com/photo-1530026405186-ed1f139313f8?q=80&w=400&auto=format&fit=crop".to_string(),
        payload: GamePayload::Rpg(RpgData {
            title: Some("Cell Siege".to_string()),
            scenes,
        }),
    }
}

/// All curated games in display order.
pub fn top_rated_games() -> Vec<CuratedGame> {
    vec![monsters_bounty(), gravity_sling(), cell_siege()]
}

pub fn find_top_rated(id: &str) -> Option<CuratedGame> {
    top_rated_games().into_iter().find(|game| game.id == id)
}

pub fn find_top_rated_by_name(name: &str) -> Option<CuratedGame> {
    top_rated_games().into_iter().find(|game| game.name == name)
}
