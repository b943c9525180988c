use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use shared::{AiMode, AssemblyRevision, AssemblyStep, PhoneModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    pub fn display_name(self) -> &'static str {
        match self {
            Lang::Fr => "Français",
            Lang::En => "English",
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Fr (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Fr,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Fr => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let fr = lang() == Lang::Fr;
    match key {
        // ── Header ──────────────────────────────────────────
        "app.subtitle" => if fr { "Visualisation d'Assemblage Prototype" } else { "Prototype Assembly Visualization" },
        "app.revision" => if fr { "Révision" } else { "Revision" },
        "app.classic" => if fr { "Classique" } else { "Classic" },
        "app.hybrid" => if fr { "Hybride" } else { "Hybrid" },

        // ── Menus ───────────────────────────────────────────
        "menu.file" => if fr { "Fichier" } else { "File" },
        "menu.quit" => if fr { "Quitter" } else { "Quit" },
        "menu.assembly" => if fr { "Assemblage" } else { "Assembly" },
        "menu.next" => if fr { "Étape suivante  Espace" } else { "Next step  Space" },
        "menu.reset" => if fr { "Réinitialiser  R" } else { "Reset  R" },
        "menu.view" => if fr { "Affichage" } else { "View" },
        "menu.ai_studio" => if fr { "Studio IA  Ctrl+I" } else { "AI Studio  Ctrl+I" },
        "menu.step_info" => if fr { "Fiche de l'étape" } else { "Step details" },
        "menu.grid" => if fr { "Grille" } else { "Grid" },
        "menu.reset_camera" => if fr { "Réinitialiser la caméra" } else { "Reset camera" },
        "menu.language" => if fr { "Langue" } else { "Language" },
        "menu.settings" => if fr { "Paramètres..." } else { "Settings..." },

        // ── Step controls ───────────────────────────────────
        "step.part" => if fr { "PARTIE" } else { "PART" },
        "step.next" => if fr { "Étape Suivante" } else { "Next Step" },
        "step.complete" => if fr { "Assemblage Terminé" } else { "Assembly Complete" },
        "step.reset" => if fr { "Réinitialiser" } else { "Reset" },

        // ── AI studio ───────────────────────────────────────
        "ai.title" => if fr { "Studio IA" } else { "AI Studio" },
        "ai.reference" => if fr { "Image de référence (Optionnel Veo, Requis Éditer)" } else { "Reference image (optional for Veo, required for Edit)" },
        "ai.choose_file" => if fr { "Choisir un fichier..." } else { "Choose file..." },
        "ai.no_file" => if fr { "Aucun fichier" } else { "No file" },
        "ai.remove_file" => if fr { "Retirer" } else { "Remove" },
        "ai.pick_title" => if fr { "Choisir une image de référence" } else { "Choose a reference image" },
        "ai.prompt" => if fr { "Prompt (Consigne)" } else { "Prompt" },
        "ai.prompt_hint" => if fr { "Décrivez le résultat attendu..." } else { "Describe the expected result..." },
        "ai.prompt_hint_analyze" => if fr { "Posez une question sur l'assemblage..." } else { "Ask a question about the assembly..." },
        "ai.submit" => if fr { "Lancer la Tâche IA" } else { "Run AI Task" },
        "ai.generating" => if fr { "Génération..." } else { "Generating..." },
        "ai.result" => if fr { "Résultat" } else { "Result" },
        "ai.open_video" => if fr { "Ouvrir la vidéo" } else { "Open video" },
        "ai.task_done" => if fr { "Tâche terminée." } else { "Task completed." },
        "ai.missing_image" => if fr { "Veuillez télécharger une image à éditer." } else { "Please upload an image to edit." },
        "ai.generic_error" => if fr { "Une erreur est survenue" } else { "An error occurred" },

        // ── Status bar ──────────────────────────────────────
        "status.step" => if fr { "Étape" } else { "Step" },
        "status.model" => if fr { "Modèle" } else { "Model" },
        "status.ai_busy" => if fr { "IA en cours" } else { "AI running" },
        "status.ai_idle" => if fr { "IA prête" } else { "AI ready" },
        "status.nav_hint" => if fr { "Glisser : orbite | Clic droit : déplacer | Molette : zoom" } else { "Drag: orbit | Right drag: pan | Scroll: zoom" },

        // ── Settings window ────────────────────────────────
        "settings.title" => if fr { "Paramètres" } else { "Settings" },
        "settings.interface" => if fr { "Interface" } else { "Interface" },
        "settings.font_size" => if fr { "Taille de police" } else { "Font size" },
        "settings.viewport" => if fr { "Vue 3D" } else { "Viewport" },
        "settings.background" => if fr { "Arrière-plan" } else { "Background" },
        "settings.idle_sway" => if fr { "Balancement au repos" } else { "Idle sway" },
        "settings.ai" => if fr { "IA générative" } else { "Generative AI" },
        "settings.base_url" => if fr { "URL de l'API" } else { "API URL" },
        "settings.key_env" => if fr { "Variable de la clé" } else { "Key variable" },
        "settings.poll" => if fr { "Intervalle de sondage (s)" } else { "Poll interval (s)" },
        "settings.models" => if fr { "Modèles" } else { "Models" },
        "settings.reset" => if fr { "Valeurs par défaut" } else { "Reset to defaults" },
        "settings.close" => if fr { "Fermer" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// Tab label of an AI mode
pub fn mode_label(mode: AiMode) -> &'static str {
    let fr = lang() == Lang::Fr;
    match mode {
        AiMode::Video => if fr { "Vidéo Veo" } else { "Veo Video" },
        AiMode::Image => "Imagen",
        AiMode::Edit => if fr { "Éditer (Flash)" } else { "Edit (Flash)" },
        AiMode::Analyze => if fr { "Analyse Pro" } else { "Pro Analysis" },
    }
}

pub fn mode_description(mode: AiMode) -> &'static str {
    let fr = lang() == Lang::Fr;
    match mode {
        AiMode::Video => if fr { "Générez des vidéos 16:9 à partir de texte ou animez une image." } else { "Generate 16:9 videos from text or animate an image." },
        AiMode::Image => if fr { "Générez des textures haute fidélité ou des concepts d'arrière-plan." } else { "Generate high fidelity textures or background concepts." },
        AiMode::Edit => if fr { "Éditez des images conceptuelles via langage naturel." } else { "Edit concept images with natural language." },
        AiMode::Analyze => if fr { "Analysez la logique d'assemblage ou le contenu." } else { "Analyze the assembly logic or content." },
    }
}

/// Title of a step; the Classic base step names the phone it is built on
pub fn step_label(revision: AssemblyRevision, step: AssemblyStep, model: PhoneModel) -> &'static str {
    use AssemblyRevision::*;
    use AssemblyStep::*;
    let fr = lang() == Lang::Fr;
    match (revision, step) {
        (_, Chassis) => match model {
            PhoneModel::IPhone12 => "iPhone 12 Pro (Base)",
            PhoneModel::GalaxyS22 => "Samsung Galaxy S22 (Base)",
        },
        (Classic, SolarModule) => if fr { "Module Solaire Monocristallin" } else { "Monocrystalline Solar Module" },
        (Classic, Pcb) => if fr { "Circuit de Régulation (PCB)" } else { "Regulation Circuit (PCB)" },
        (_, Slider) => if fr { "Volet Coulissant (ABS)" } else { "Sliding Cover (ABS)" },
        (Classic, ThermalInsert) => if fr { "Insert Thermique" } else { "Thermal Insert" },
        (_, Case) => if fr { "Coque Hybride (Design Translucide)" } else { "Hybrid Case (Translucent Design)" },
        (Hybrid, SolarModule) => if fr { "Module Solaire (Haute Visibilité)" } else { "Solar Module (High Visibility)" },
        (_, Battery) => if fr { "Batterie Li-Po (Interne)" } else { "Li-Po Battery (Internal)" },
        (Hybrid, Pcb) => if fr { "Unité de Gestion (PCB)" } else { "Management Unit (PCB)" },
        (Hybrid, ThermalInsert) => if fr { "Isolation Kapton (Ambre)" } else { "Kapton Insulation (Amber)" },
        (_, Phone) => if fr { "Installation du Smartphone" } else { "Smartphone Installation" },
    }
}

pub fn step_description(revision: AssemblyRevision, step: AssemblyStep) -> &'static str {
    use AssemblyRevision::*;
    use AssemblyStep::*;
    let fr = lang() == Lang::Fr;
    match (revision, step) {
        (_, Chassis) => if fr {
            "Support principal structurel permettant l'intégration modulaire de la coque solaire."
        } else {
            "Main structural support allowing modular integration of the solar case."
        },
        (Classic, SolarModule) => if fr {
            "Cellules photovoltaïques haute efficacité intégrées pour une capture optimale de l'énergie lumineuse ambiante."
        } else {
            "Integrated high efficiency photovoltaic cells for optimal capture of ambient light."
        },
        (Classic, Pcb) => if fr {
            "Micro-contrôleur intelligent gérant la conversion de tension et la protection contre les surcharges."
        } else {
            "Smart microcontroller handling voltage conversion and overcharge protection."
        },
        (_, Slider) => if fr {
            "Protection mécanique rétractable pour le panneau solaire, offrant une durabilité accrue en déplacement."
        } else {
            "Retractable mechanical protection for the solar panel, for extra durability on the move."
        },
        (Classic, ThermalInsert) => if fr {
            "Couche de dissipation thermique passive pour protéger le smartphone de la chaleur générée par l'induction."
        } else {
            "Passive heat dissipation layer protecting the smartphone from induction heat."
        },
        (_, Case) => if fr {
            "Châssis élégant avec finition givrée/transparente laissant apparaître les composants internes. Structure renforcée avec anneau MagSafe intégré."
        } else {
            "Sleek frame with a frosted/clear finish showing the internal components. Reinforced structure with a built-in MagSafe ring."
        },
        (Hybrid, SolarModule) => if fr {
            "Panneau photovoltaïque monocristallin ajusté, positionné sous le module caméra pour optimiser la surface sans obstruction."
        } else {
            "Fitted monocrystalline panel placed below the camera module to maximise the unobstructed surface."
        },
        (_, Battery) => if fr {
            "Cellule énergétique argentée ultra-fine logée à l'intérieur de la coque pour 24h d'autonomie."
        } else {
            "Ultra-thin silver energy cell housed inside the case for 24h of autonomy."
        },
        (Hybrid, Pcb) => if fr {
            "Carte électronique visible en bas de coque, régulant intelligemment la charge solaire."
        } else {
            "Circuit board visible at the bottom of the case, smartly regulating solar charging."
        },
        (Hybrid, ThermalInsert) => if fr {
            "Film isolant thermique technique de couleur ambrée pour la sécurité du smartphone."
        } else {
            "Amber technical thermal insulation film keeping the smartphone safe."
        },
        (_, Phone) => if fr {
            "Insertion finale de l'appareil dans l'écosystème SolarFrame assemblé."
        } else {
            "Final insertion of the device into the assembled SolarFrame ecosystem."
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_step_has_text() {
        for revision in AssemblyRevision::all() {
            for step in revision.steps() {
                for model in PhoneModel::all() {
                    assert!(!step_label(*revision, *step, *model).is_empty());
                }
                assert!(!step_description(*revision, *step).is_empty());
            }
        }
    }

    #[test]
    fn test_base_label_follows_model() {
        let r = AssemblyRevision::Classic;
        assert_ne!(
            step_label(r, AssemblyStep::Chassis, PhoneModel::IPhone12),
            step_label(r, AssemblyStep::Chassis, PhoneModel::GalaxyS22)
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(t("no.such.key"), "???");
    }
}
