//! The four file maps the compiler consumes.

use tracing::trace;

use crate::module::FileMap;
use crate::options::CompilerOptions;
use crate::segment::split_file_name;

/// Page/layout, error, not-found and loading files.
#[derive(Debug, Clone, Default)]
pub struct RouteFiles {
    /// Page and layout files.
    pub pages: FileMap,
    /// Error boundary files.
    pub errors: FileMap,
    /// Not-found files.
    pub not_found: FileMap,
    /// Loading fallback files.
    pub loading: FileMap,
}

impl RouteFiles {
    /// Splits one flat map into the four maps by file stem. Files with any
    /// other stem are skipped.
    pub fn classify(files: &FileMap, options: &CompilerOptions) -> Self {
        let mut classified = Self::default();

        for (file, module) in files.iter() {
            let name = file.rsplit('/').next().unwrap_or(file);
            let (stem, _) = split_file_name(name);

            let target = if stem == options.page_stem || stem == options.layout_stem {
                &mut classified.pages
            } else if stem == options.error_stem {
                &mut classified.errors
            } else if stem == options.not_found_stem {
                &mut classified.not_found
            } else if stem == options.loading_stem {
                &mut classified.loading
            } else {
                trace!(file, "Skipping non-route file");
                continue;
            };
            target.insert(file, module.clone());
        }

        classified
    }

    /// Total number of classified files.
    pub fn len(&self) -> usize {
        self.pages.len() + self.errors.len() + self.not_found.len() + self.loading.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{module_loader, PageModule};

    #[test]
    fn test_classify_by_stem() {
        let files: FileMap = [
            "./app/layout.tsx",
            "./app/page.tsx",
            "./app/users/page.tsx",
            "./app/error.tsx",
            "./app/404.tsx",
            "./app/loading.tsx",
            "./app/users/_components/table.tsx",
        ]
        .into_iter()
        .map(|file| (file, module_loader(|| async { Ok(PageModule::new(())) })))
        .collect();

        let classified = RouteFiles::classify(&files, &CompilerOptions::default());

        let pages: Vec<&str> = classified.pages.iter().map(|(p, _)| p).collect();
        assert_eq!(
            pages,
            vec!["./app/layout.tsx", "./app/page.tsx", "./app/users/page.tsx"]
        );
        assert!(classified.errors.contains("./app/error.tsx"));
        assert!(classified.not_found.contains("./app/404.tsx"));
        assert!(classified.loading.contains("./app/loading.tsx"));
        assert_eq!(classified.len(), 6);
    }
}
