//! Nations and timeline of the simulation.

use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: &'static str,
    pub name: &'static str,
    pub leader: &'static str,
    pub color: &'static str,
    pub playable: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PlayerChoice {
    pub text: &'static str,
    pub consequence: &'static str,
    pub reality: &'static str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapChange {
    pub country_id: &'static str,
    pub new_owner_id: &'static str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub interactive_for: &'static [&'static str],
    pub choices: &'static [PlayerChoice],
    pub map_changes: &'static [MapChange],
}

pub static COUNTRIES: &[Country] = &[
    Country { id: "de", name: "Germany", leader: "Adolf Hitler", color: "#5a5a5a", playable: true },
    Country { id: "uk", name: "United Kingdom", leader: "Winston Churchill", color: "#c8102e", playable: true },
    Country { id: "fr", name: "France", leader: "Paul Reynaud", color: "#0055a4", playable: true },
    Country { id: "ussr", name: "Soviet Union", leader: "Joseph Stalin", color: "#a31515", playable: true },
    Country { id: "it", name: "Italy", leader: "Benito Mussolini", color: "#2e7d32", playable: false },
    Country { id: "pl", name: "Poland", leader: "Ignacy Moscicki", color: "#e57373", playable: false },
    Country { id: "cz", name: "Czechoslovakia", leader: "Edvard Benes", color: "#7986cb", playable: false },
    Country { id: "au", name: "Austria", leader: "Kurt Schuschnigg", color: "#ffb74d", playable: false },
    Country { id: "be", name: "Belgium", leader: "Leopold III", color: "#fdd835", playable: false },
    Country { id: "nl", name: "Netherlands", leader: "Wilhelmina", color: "#ff7043", playable: false },
    Country { id: "ch", name: "Switzerland", leader: "Federal Council", color: "#bdbdbd", playable: false },
];

pub static TIMELINE: &[TimelineEvent] = &[
    TimelineEvent {
        date: "March 1936",
        title: "Remilitarization of the Rhineland",
        description: "German troops march into the demilitarized Rhineland in breach of the Treaty of Versailles.",
        interactive_for: &["fr"],
        choices: &[
            PlayerChoice {
                text: "Mobilize and force a withdrawal",
                consequence: "German commanders had orders to retreat if opposed; the regime suffers an early humiliation.",
                reality: "France, divided and awaiting elections, protested but did not act.",
            },
            PlayerChoice {
                text: "Protest diplomatically",
                consequence: "N/A",
                reality: "France, divided and awaiting elections, protested but did not act.",
            },
        ],
        map_changes: &[],
    },
    TimelineEvent {
        date: "March 1938",
        title: "The Anschluss",
        description: "Austria is annexed into the German Reich after a staged invitation.",
        interactive_for: &["de"],
        choices: &[
            PlayerChoice {
                text: "Annex Austria",
                consequence: "N/A",
                reality: "The annexation went ahead without resistance and was ratified by a controlled plebiscite.",
            },
            PlayerChoice {
                text: "Hold back",
                consequence: "Without Austria, Czechoslovakia is far harder to encircle.",
                reality: "The annexation went ahead without resistance and was ratified by a controlled plebiscite.",
            },
        ],
        map_changes: &[MapChange { country_id: "au", new_owner_id: "de" }],
    },
    TimelineEvent {
        date: "September 1938",
        title: "The Munich Agreement",
        description: "Britain and France consent to Germany taking the Sudetenland; within months the rest of Czechoslovakia falls.",
        interactive_for: &["uk", "fr"],
        choices: &[
            PlayerChoice {
                text: "Sign the agreement",
                consequence: "N/A",
                reality: "Chamberlain returned promising 'peace for our time'; Germany occupied Prague in March 1939.",
            },
            PlayerChoice {
                text: "Guarantee Czechoslovakia's borders",
                consequence: "Czech fortifications and army stand with you; war may come a year earlier, on better terms.",
                reality: "Chamberlain returned promising 'peace for our time'; Germany occupied Prague in March 1939.",
            },
        ],
        map_changes: &[MapChange { country_id: "cz", new_owner_id: "de" }],
    },
    TimelineEvent {
        date: "September 1939",
        title: "Invasion of Poland",
        description: "Germany invades Poland; the Soviet Union follows from the east under the secret pact.",
        interactive_for: &["uk", "ussr"],
        choices: &[
            PlayerChoice {
                text: "Honor your commitments",
                consequence: "N/A",
                reality: "Britain and France declared war on Germany on 3 September; the USSR invaded on 17 September.",
            },
            PlayerChoice {
                text: "Stay out of the conflict",
                consequence: "Germany consolidates the east unopposed and turns west with no second front.",
                reality: "Britain and France declared war on Germany on 3 September; the USSR invaded on 17 September.",
            },
        ],
        map_changes: &[MapChange { country_id: "pl", new_owner_id: "de" }],
    },
    TimelineEvent {
        date: "May 1940",
        title: "The Fall of France",
        description: "German armour breaks through the Ardennes; the Low Countries and France fall within six weeks.",
        interactive_for: &["fr", "uk"],
        choices: &[
            PlayerChoice {
                text: "Evacuate the army from Dunkirk",
                consequence: "N/A",
                reality: "Over 330,000 Allied soldiers were evacuated; France signed an armistice on 22 June.",
            },
            PlayerChoice {
                text: "Fight on from the colonies",
                consequence: "A government in exile keeps the French fleet in the war.",
                reality: "Over 330,000 Allied soldiers were evacuated; France signed an armistice on 22 June.",
            },
        ],
        map_changes: &[
            MapChange { country_id: "fr", new_owner_id: "de" },
            MapChange { country_id: "be", new_owner_id: "de" },
            MapChange { country_id: "nl", new_owner_id: "de" },
        ],
    },
    TimelineEvent {
        date: "June 1941",
        title: "Operation Barbarossa",
        description: "Germany launches the largest invasion in history against the Soviet Union.",
        interactive_for: &["ussr", "de"],
        choices: &[
            PlayerChoice {
                text: "Trade space for time and relocate industry east",
                consequence: "N/A",
                reality: "Factories were moved beyond the Urals; the German advance stalled before Moscow in December.",
            },
            PlayerChoice {
                text: "Hold every position at all costs",
                consequence: "Whole armies are encircled in the first weeks.",
                reality: "Factories were moved beyond the Urals; the German advance stalled before Moscow in December.",
            },
        ],
        map_changes: &[],
    },
    TimelineEvent {
        date: "June 1944",
        title: "D-Day",
        description: "Allied forces land in Normandy and liberate France and the Low Countries over the following months.",
        interactive_for: &["uk", "de"],
        choices: &[
            PlayerChoice {
                text: "Commit everything to Normandy",
                consequence: "N/A",
                reality: "The landings succeeded; Paris was liberated in August 1944.",
            },
            PlayerChoice {
                text: "Expect the main landing at Calais",
                consequence: "Reserves wait in the wrong place while the beachhead grows.",
                reality: "The landings succeeded; Paris was liberated in August 1944.",
            },
        ],
        map_changes: &[
            MapChange { country_id: "fr", new_owner_id: "fr" },
            MapChange { country_id: "be", new_owner_id: "be" },
            MapChange { country_id: "nl", new_owner_id: "nl" },
        ],
    },
    TimelineEvent {
        date: "May 1945",
        title: "Victory in Europe",
        description: "Germany surrenders unconditionally. Occupied nations regain their independence.",
        interactive_for: &[],
        choices: &[],
        map_changes: &[
            MapChange { country_id: "pl", new_owner_id: "pl" },
            MapChange { country_id: "cz", new_owner_id: "cz" },
            MapChange { country_id: "au", new_owner_id: "au" },
        ],
    },
];

pub fn find_country(id: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|country| country.id == id)
}
