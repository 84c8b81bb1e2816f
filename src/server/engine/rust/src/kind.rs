/* src/server/engine/rust/src/kind.rs */

use std::fmt;

macro_rules! component_kinds {
  ($($variant:ident => $name:literal,)+) => {
    /// Every section type the site knows how to render.
    /// `Unknown` carries the raw type name for types with no registry entry.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ComponentKind {
      $($variant,)+
      Unknown(String),
    }

    impl ComponentKind {
      /// Known kinds in declaration order.
      pub const KNOWN: &'static [ComponentKind] = &[$(ComponentKind::$variant,)+];

      const KNOWN_NAMES: &'static [&'static str] = &[$($name,)+];

      /// Registry key for this kind.
      pub fn name(&self) -> &str {
        match self {
          $(ComponentKind::$variant => $name,)+
          ComponentKind::Unknown(name) => name,
        }
      }

      fn from_canonical(name: &str) -> Option<ComponentKind> {
        match name {
          $($name => Some(ComponentKind::$variant),)+
          _ => None,
        }
      }
    }
  };
}

component_kinds! {
  Hero => "HeroSection",
  Cta => "CTASection",
  About => "AboutSection",
  Features => "FeaturesSection",
  Faq => "FAQSection",
  Testimonials => "TestimonialsSection",
  Stats => "StatsSection",
  Contact => "ContactSection",
  Services => "ServicesSection",
  Process => "ProcessSection",
  Benefits => "BenefitsSection",
  PainPoints => "PainPointsSection",
  UseCases => "UseCasesSection",
  Industries => "IndustriesSection",
  CaseStudies => "CaseStudiesSection",
  Team => "TeamSection",
  Milestones => "MilestonesSection",
  Values => "ValuesSection",
  Video => "VideoSection",
  Slider => "SliderSection",
  TrainingPrograms => "TrainingProgramsSection",
  TrainingModules => "TrainingModulesSection",
  SupportPlans => "SupportPlansSection",
  PayrollHero => "PayrollHeroSection",
  PayrollFaq => "PayrollFAQSection",
  PayrollPainPoints => "PayrollPainPointsSection",
  PayrollWorkflow => "PayrollWorkflowSection",
  ManufacturingHero => "ManufacturingHeroSection",
  ManufacturingPainPoints => "ManufacturingPainPointsSection",
  ManufacturingCaseStudies => "ManufacturingCaseStudies",
}

impl ComponentKind {
  /// Resolve a persisted type name: exact match first, then the alias
  /// candidates in priority order, else `Unknown`.
  pub fn resolve(name: &str) -> ComponentKind {
    candidates(name)
      .iter()
      .find_map(|c| Self::from_canonical(c))
      .unwrap_or_else(|| ComponentKind::Unknown(name.to_string()))
  }

  pub fn is_known(&self) -> bool {
    !matches!(self, ComponentKind::Unknown(_))
  }

  pub fn known_names() -> impl Iterator<Item = &'static str> {
    Self::KNOWN_NAMES.iter().copied()
  }
}

impl fmt::Display for ComponentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Lookup candidates for a type name, exact name first:
/// 1. `CTA` <-> `Cta` swapped
/// 2. trailing `Section` stripped
/// 3. pluralizing `s` before a trailing `Section` stripped
/// 4. first letter capitalized
pub fn candidates(name: &str) -> Vec<String> {
  let mut out = vec![name.to_string()];
  let mut push = |c: String| {
    if !c.is_empty() && !out.contains(&c) {
      out.push(c);
    }
  };

  if name.contains("CTA") {
    push(name.replace("CTA", "Cta"));
  } else if name.contains("Cta") {
    push(name.replace("Cta", "CTA"));
  }
  if let Some(stem) = name.strip_suffix("Section") {
    push(stem.to_string());
  }
  if let Some(stem) = name.strip_suffix("sSection") {
    push(format!("{stem}Section"));
  }
  let mut chars = name.chars();
  if let Some(head) = chars.next() {
    if head.is_lowercase() {
      push(head.to_uppercase().chain(chars).collect());
    }
  }
  out
}

fn levenshtein(a: &str, b: &str) -> usize {
  let n = b.chars().count();
  let mut prev: Vec<usize> = (0..=n).collect();
  let mut curr = vec![0; n + 1];
  for (i, ca) in a.chars().enumerate() {
    curr[0] = i + 1;
    for (j, cb) in b.chars().enumerate() {
      let cost = usize::from(!ca.eq_ignore_ascii_case(&cb));
      curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[n]
}

/// Closest registered name within edit distance 3, for "not found" hints.
pub fn did_you_mean<'a>(name: &str, registered: &[&'a str]) -> Option<&'a str> {
  registered
    .iter()
    .map(|c| (*c, levenshtein(name, c)))
    .filter(|(_, d)| *d <= 3 && *d > 0)
    .min_by_key(|(_, d)| *d)
    .map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exact_names_resolve() {
    assert_eq!(ComponentKind::resolve("HeroSection"), ComponentKind::Hero);
    assert_eq!(ComponentKind::resolve("ManufacturingCaseStudies"), ComponentKind::ManufacturingCaseStudies);
  }

  #[test]
  fn cta_casing_aliases() {
    assert_eq!(ComponentKind::resolve("CtaSection"), ComponentKind::Cta);
    assert_eq!(ComponentKind::resolve("CTASection"), ComponentKind::Cta);
  }

  #[test]
  fn section_suffix_aliases() {
    assert_eq!(
      ComponentKind::resolve("ManufacturingCaseStudiesSection"),
      ComponentKind::ManufacturingCaseStudies
    );
    assert_eq!(ComponentKind::resolve("PayrollFAQsSection"), ComponentKind::PayrollFaq);
  }

  #[test]
  fn lowercase_first_letter_alias() {
    assert_eq!(ComponentKind::resolve("heroSection"), ComponentKind::Hero);
  }

  #[test]
  fn unknown_keeps_raw_name() {
    let kind = ComponentKind::resolve("NotRegisteredThing");
    assert_eq!(kind, ComponentKind::Unknown("NotRegisteredThing".into()));
    assert_eq!(kind.name(), "NotRegisteredThing");
    assert!(!kind.is_known());
  }

  #[test]
  fn candidate_order() {
    assert_eq!(candidates("featuresSection"), vec![
      "featuresSection".to_string(),
      "features".to_string(),
      "featureSection".to_string(),
      "FeaturesSection".to_string(),
    ]);
  }

  #[test]
  fn known_names_match_table() {
    let names: Vec<&str> = ComponentKind::known_names().collect();
    assert_eq!(names.len(), ComponentKind::KNOWN.len());
    for (kind, name) in ComponentKind::KNOWN.iter().zip(&names) {
      assert_eq!(kind.name(), *name);
      assert_eq!(&ComponentKind::resolve(name), kind);
    }
  }

  #[test]
  fn did_you_mean_suggests_close_name() {
    let names: Vec<&str> = ComponentKind::known_names().collect();
    assert_eq!(did_you_mean("HeroSecton", &names), Some("HeroSection"));
    assert_eq!(did_you_mean("NotRegisteredThing", &names), None);
  }
}
