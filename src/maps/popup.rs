use crate::models::MapMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupLineKind {
    Name,
    Category,
    Address,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupLine {
    pub kind: PopupLineKind,
    pub text: String,
}

/// Contenido del popup de un marcador: nombre, categoría, dirección (en ese orden)
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub lines: Vec<PopupLine>,
}

impl PopupContent {
    pub fn for_marker(marker: &MapMarker) -> Self {
        let mut lines = vec![PopupLine {
            kind: PopupLineKind::Name,
            text: marker.name.clone(),
        }];

        let optional = [
            (PopupLineKind::Category, &marker.category),
            (PopupLineKind::Address, &marker.address),
        ];
        for (kind, text) in optional {
            if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
                lines.push(PopupLine {
                    kind,
                    text: text.to_string(),
                });
            }
        }

        Self { lines }
    }

    /// Una línea por campo
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_lines_in_order() {
        let marker = MapMarker::new("1", "Le Baobab", 5.336, -4.027)
            .with_address("Rue des Jardins")
            .with_category("Restaurant");
        let popup = PopupContent::for_marker(&marker);

        let kinds: Vec<_> = popup.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![PopupLineKind::Name, PopupLineKind::Category, PopupLineKind::Address]
        );
        assert_eq!(popup.to_plain_text(), "Le Baobab\nRestaurant\nRue des Jardins");
    }

    #[test]
    fn test_popup_skips_missing_fields() {
        let marker = MapMarker::new("1", "Pharmacie du Plateau", 5.3, -4.0).with_address("");
        assert_eq!(PopupContent::for_marker(&marker).to_plain_text(), "Pharmacie du Plateau");
    }

    #[test]
    fn test_popup_keeps_non_empty_whitespace() {
        let marker = MapMarker::new("1", "A", 5.3, -4.0).with_category("  ");
        let popup = PopupContent::for_marker(&marker);
        assert_eq!(popup.lines.len(), 2);
        assert_eq!(popup.lines[1].kind, PopupLineKind::Category);
        assert_eq!(popup.to_plain_text(), "A\n  ");
    }
}
