//! Configuration files used across test suites.

/// Version 2 config with no python section
pub const MINIMAL: &str = "version: 2\n";

/// Minimal config after `use-build-tools`
pub const MINIMAL_MIGRATED: &str = "\
version: 2
build:
  os: ubuntu-20.04
  tools:
    python: '3.7'
";

/// Declares the python version the legacy way
pub const PYTHON_VERSION: &str = "\
version: 2
python:
  version: '3.8'
";

/// [`PYTHON_VERSION`] after `use-build-tools`
pub const PYTHON_VERSION_MIGRATED: &str = "\
version: 2
build:
  os: ubuntu-20.04
  tools:
    python: '3.8'
";

/// Python version next to an install list
pub const PYTHON_INSTALL: &str = "\
version: 2
sphinx:
  configuration: docs/conf.py
python:
  version: '3.9'
  install:
    - requirements: docs/requirements.txt
    - method: pip
      path: .
";

/// [`PYTHON_INSTALL`] after `use-build-tools`
pub const PYTHON_INSTALL_MIGRATED: &str = "\
version: 2
build:
  os: ubuntu-20.04
  tools:
    python: '3.9'
sphinx:
  configuration: docs/conf.py
python:
  install:
    - requirements: docs/requirements.txt
    - method: pip
      path: .
";

/// Already uses `build.tools`
pub const MIGRATED: &str = "\
version: 2
build:
  os: ubuntu-22.04
  tools:
    python: '3.11'
";

/// Legacy version 1 config
pub const VERSION_ONE: &str = "\
python:
  version: 3
requirements_file: docs/requirements.txt
";

/// Has a schema-invalid top-level key
pub const INVALID_KEY: &str = "\
version: 2
not_a_key: true
";
